//! Fixed icon set available to feature cards.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum FeatureIcon {
    #[default]
    Zap,
    Shield,
    Smartphone,
}

impl FeatureIcon {
    pub const ALL: [FeatureIcon; 3] = [
        FeatureIcon::Zap,
        FeatureIcon::Shield,
        FeatureIcon::Smartphone,
    ];

    /// Look up an icon by its stored name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Zap" => Some(Self::Zap),
            "Shield" => Some(Self::Shield),
            "Smartphone" => Some(Self::Smartphone),
            _ => None,
        }
    }

    /// Resolve a stored name, falling back to the default icon for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zap => "Zap",
            Self::Shield => "Shield",
            Self::Smartphone => "Smartphone",
        }
    }

    /// Inline SVG body (stroke icons on a 24x24 grid).
    pub fn svg(self) -> &'static str {
        match self {
            Self::Zap => r#"<polygon points="13 2 3 14 12 14 11 22 21 10 12 10 13 2"></polygon>"#,
            Self::Shield => r#"<path d="M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z"></path>"#,
            Self::Smartphone => {
                r#"<rect x="5" y="2" width="14" height="20" rx="2" ry="2"></rect><line x1="12" y1="18" x2="12.01" y2="18"></line>"#
            }
        }
    }
}
