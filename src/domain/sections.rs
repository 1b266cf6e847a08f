//! Typed section payloads.
//!
//! Sections are stored as a `type` tag plus a loosely shaped JSON document.
//! [`SectionContent::from_stored`] resolves both into a closed enum exactly
//! once, at the content-store boundary, so nothing downstream has to inspect
//! tags or probe JSON fields.
//!
//! Missing fields and JSON `null` degrade to empty values. Payloads whose
//! structure cannot be read at all (for example `features` holding a string)
//! become [`SectionContent::Malformed`] and render as nothing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::markup::TrustedHtml;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    Features,
    TextBlock,
    ContactForm,
}

impl SectionKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "hero" => Some(Self::Hero),
            "features" => Some(Self::Features),
            "text_block" => Some(Self::TextBlock),
            "contact_form" => Some(Self::ContactForm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Features => "features",
            Self::TextBlock => "text_block",
            Self::ContactForm => "contact_form",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct HeroContent {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cta_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cta_link: String,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct FeaturesContent {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBlockContent {
    pub title: String,
    pub content: TrustedHtml,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTextBlockContent {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    content: String,
    image_url: Option<String>,
}

impl From<RawTextBlockContent> for TextBlockContent {
    fn from(raw: RawTextBlockContent) -> Self {
        Self {
            title: raw.title,
            content: TrustedHtml::sanitize(&raw.content),
            image_url: raw.image_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// Contact form configuration. Unknown keys are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ContactFormContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    Hero(HeroContent),
    Features(FeaturesContent),
    TextBlock(TextBlockContent),
    ContactForm(ContactFormContent),
    /// Stored tag outside the known set. Valid storage, renders as nothing.
    Unrecognized { tag: String },
    /// Known tag whose payload could not be read.
    Malformed { kind: SectionKind, reason: String },
}

#[derive(Debug, Error)]
#[error("`{kind}` section payload is malformed: {source}")]
pub struct SectionContentError {
    pub kind: SectionKind,
    #[source]
    pub source: serde_json::Error,
}

impl SectionContent {
    /// Resolve a stored tag and payload, degrading unreadable payloads to `Malformed`.
    pub fn from_stored(tag: &str, payload: serde_json::Value) -> Self {
        match Self::try_from_stored(tag, payload) {
            Ok(content) => content,
            Err(err) => SectionContent::Malformed {
                kind: err.kind,
                reason: err.source.to_string(),
            },
        }
    }

    pub fn try_from_stored(
        tag: &str,
        payload: serde_json::Value,
    ) -> Result<Self, SectionContentError> {
        let Some(kind) = SectionKind::from_tag(tag) else {
            return Ok(SectionContent::Unrecognized {
                tag: tag.to_string(),
            });
        };

        let payload = match payload {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };

        let wrap = |source| SectionContentError { kind, source };
        let content = match kind {
            SectionKind::Hero => {
                SectionContent::Hero(serde_json::from_value(payload).map_err(wrap)?)
            }
            SectionKind::Features => {
                SectionContent::Features(serde_json::from_value(payload).map_err(wrap)?)
            }
            SectionKind::TextBlock => {
                let raw: RawTextBlockContent = serde_json::from_value(payload).map_err(wrap)?;
                SectionContent::TextBlock(raw.into())
            }
            SectionKind::ContactForm => {
                SectionContent::ContactForm(serde_json::from_value(payload).map_err(wrap)?)
            }
        };

        Ok(content)
    }

    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            SectionContent::Hero(_) => Some(SectionKind::Hero),
            SectionContent::Features(_) => Some(SectionKind::Features),
            SectionContent::TextBlock(_) => Some(SectionKind::TextBlock),
            SectionContent::ContactForm(_) => Some(SectionKind::ContactForm),
            SectionContent::Malformed { kind, .. } => Some(*kind),
            SectionContent::Unrecognized { .. } => None,
        }
    }

    /// The tag as it was stored.
    pub fn tag(&self) -> &str {
        match self {
            SectionContent::Unrecognized { tag } => tag,
            other => other.kind().map(SectionKind::as_str).unwrap_or_default(),
        }
    }

    pub fn is_renderable(&self) -> bool {
        !matches!(
            self,
            SectionContent::Unrecognized { .. } | SectionContent::Malformed { .. }
        )
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hero_payload_resolves_all_fields() {
        let content = SectionContent::from_stored(
            "hero",
            json!({
                "title": "About Us",
                "subtitle": "Who we are",
                "cta_text": "Learn",
                "cta_link": "/contact",
                "background_color": "#112233"
            }),
        );

        assert_eq!(
            content,
            SectionContent::Hero(HeroContent {
                title: "About Us".into(),
                subtitle: "Who we are".into(),
                cta_text: "Learn".into(),
                cta_link: "/contact".into(),
                background_color: Some("#112233".into()),
            })
        );
    }

    #[test]
    fn missing_and_null_fields_degrade_to_empty() {
        let content = SectionContent::from_stored("hero", json!({ "title": null }));
        assert_eq!(content, SectionContent::Hero(HeroContent::default()));

        let content = SectionContent::from_stored("features", serde_json::Value::Null);
        assert_eq!(content, SectionContent::Features(FeaturesContent::default()));
    }

    #[test]
    fn unknown_tag_is_unrecognized_not_an_error() {
        let content = SectionContent::try_from_stored("unknown_x", json!({ "a": 1 }))
            .expect("unknown tags are valid storage");
        assert_eq!(
            content,
            SectionContent::Unrecognized {
                tag: "unknown_x".into()
            }
        );
        assert_eq!(content.tag(), "unknown_x");
        assert!(content.kind().is_none());
        assert!(!content.is_renderable());
    }

    #[test]
    fn structurally_invalid_payload_is_malformed() {
        let err = SectionContent::try_from_stored("features", json!({ "features": "nope" }))
            .expect_err("string is not a feature list");
        assert_eq!(err.kind, SectionKind::Features);

        let content = SectionContent::from_stored("features", json!({ "features": "nope" }));
        assert!(matches!(
            content,
            SectionContent::Malformed {
                kind: SectionKind::Features,
                ..
            }
        ));
        assert_eq!(content.tag(), "features");
    }

    #[test]
    fn text_block_markup_is_sanitized_at_the_boundary() {
        let content = SectionContent::from_stored(
            "text_block",
            json!({
                "title": "Story",
                "content": "<p>Safe</p><script>bad()</script>",
                "image_url": "  "
            }),
        );

        match content {
            SectionContent::TextBlock(block) => {
                assert_eq!(block.title, "Story");
                assert_eq!(block.content.as_str(), "<p>Safe</p>");
                assert!(block.image_url.is_none());
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn contact_form_ignores_unknown_keys() {
        let content = SectionContent::from_stored(
            "contact_form",
            json!({ "title": "Write to us", "recipient": "ops@example.com" }),
        );
        assert_eq!(
            content,
            SectionContent::ContactForm(ContactFormContent {
                title: Some("Write to us".into()),
                description: None,
                submit_label: None,
            })
        );
    }
}
