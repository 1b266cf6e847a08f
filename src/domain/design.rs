//! Site-wide design tokens rendered as CSS custom properties.

use serde::Deserialize;

use crate::domain::entities::DesignSettingRecord;

pub const COLORS_SETTING: &str = "colors";
pub const TYPOGRAPHY_SETTING: &str = "typography";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTokens {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            primary: "#1E90FF".to_string(),
            secondary: "#FFD700".to_string(),
            background: "#F5F5F5".to_string(),
            text: "#333333".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypographyTokens {
    pub heading_font: String,
    pub body_font: String,
}

impl Default for TypographyTokens {
    fn default() -> Self {
        Self {
            heading_font: "Montserrat".to_string(),
            body_font: "Roboto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesignTokens {
    pub colors: ColorTokens,
    pub typography: TypographyTokens,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawColors {
    primary: Option<String>,
    secondary: Option<String>,
    background: Option<String>,
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawTypography {
    heading_font: Option<String>,
    body_font: Option<String>,
}

impl DesignTokens {
    /// Overlay stored settings on the defaults. Unknown settings, unreadable
    /// values and unsafe CSS values leave the default in place.
    pub fn from_settings(settings: &[DesignSettingRecord]) -> Self {
        let mut tokens = Self::default();

        for setting in settings {
            match setting.name.as_str() {
                COLORS_SETTING => {
                    let raw: RawColors =
                        serde_json::from_value(setting.value.clone()).unwrap_or_default();
                    let colors = &mut tokens.colors;
                    overlay(&mut colors.primary, raw.primary);
                    overlay(&mut colors.secondary, raw.secondary);
                    overlay(&mut colors.background, raw.background);
                    overlay(&mut colors.text, raw.text);
                }
                TYPOGRAPHY_SETTING => {
                    let raw: RawTypography =
                        serde_json::from_value(setting.value.clone()).unwrap_or_default();
                    let typography = &mut tokens.typography;
                    overlay(&mut typography.heading_font, raw.heading_font);
                    overlay(&mut typography.body_font, raw.body_font);
                }
                _ => {}
            }
        }

        tokens
    }

    /// Declarations for a `:root { … }` block.
    pub fn css_variables(&self) -> String {
        format!(
            "--color-primary: {}; --color-secondary: {}; --color-background: {}; \
             --color-text: {}; --font-heading: '{}'; --font-body: '{}';",
            self.colors.primary,
            self.colors.secondary,
            self.colors.background,
            self.colors.text,
            self.typography.heading_font,
            self.typography.body_font,
        )
    }
}

fn overlay(slot: &mut String, candidate: Option<String>) {
    if let Some(value) = candidate.and_then(|value| safe_css_value(&value)) {
        *slot = value;
    }
}

/// Returns the trimmed value when it can be embedded in a declaration or a
/// `style` attribute without escaping its context.
pub fn safe_css_value(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.len() > 64 {
        return None;
    }

    let allowed = value.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-')
    });

    allowed.then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn setting(name: &str, value: serde_json::Value) -> DesignSettingRecord {
        DesignSettingRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            value,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn defaults_apply_without_settings() {
        let tokens = DesignTokens::from_settings(&[]);
        assert_eq!(tokens.colors.primary, "#1E90FF");
        assert_eq!(tokens.colors.text, "#333333");
        assert_eq!(tokens.typography.heading_font, "Montserrat");
        assert_eq!(tokens.typography.body_font, "Roboto");
    }

    #[test]
    fn stored_values_override_defaults_individually() {
        let tokens = DesignTokens::from_settings(&[
            setting("colors", json!({ "primary": "#000000" })),
            setting("typography", json!({ "bodyFont": "Inter" })),
        ]);
        assert_eq!(tokens.colors.primary, "#000000");
        assert_eq!(tokens.colors.secondary, "#FFD700");
        assert_eq!(tokens.typography.body_font, "Inter");
        assert_eq!(tokens.typography.heading_font, "Montserrat");
    }

    #[test]
    fn unsafe_or_unreadable_values_keep_defaults() {
        let tokens = DesignTokens::from_settings(&[
            setting("colors", json!({ "primary": "red; } body { display:none" })),
            setting("typography", json!("not an object")),
        ]);
        assert_eq!(tokens, DesignTokens::default());
    }

    #[test]
    fn css_values_accept_common_color_syntax() {
        assert_eq!(safe_css_value(" #fff ").as_deref(), Some("#fff"));
        assert!(safe_css_value("rgb(0, 10, 20)").is_some());
        assert!(safe_css_value("url('x')").is_none());
        assert!(safe_css_value("").is_none());
    }

    #[test]
    fn css_variables_carry_every_token() {
        let css = DesignTokens::default().css_variables();
        assert!(css.contains("--color-primary: #1E90FF;"));
        assert!(css.contains("--font-body: 'Roboto';"));
    }
}
