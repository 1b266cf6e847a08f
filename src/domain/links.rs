//! Link targets taken from editor content.

use url::{ParseError, Url};

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Accepts fragments, relative paths (`/pricing`, `contact`, `../faq`) and
/// absolute `http`, `https`, `mailto` or `tel` URLs. Anything else (notably
/// `javascript:`) is dropped.
pub fn safe_href(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('\\') {
        return None;
    }

    if trimmed.starts_with('#') || (trimmed.starts_with('/') && !trimmed.starts_with("//")) {
        return Some(trimmed.to_string());
    }

    match Url::parse(trimmed) {
        Ok(url) => LINK_SCHEMES.contains(&url.scheme()).then(|| trimmed.to_string()),
        Err(ParseError::RelativeUrlWithoutBase) if is_bare_relative(trimmed) => {
            Some(trimmed.to_string())
        }
        Err(_) => None,
    }
}

/// Like [`safe_href`] but limited to sources a browser can load as an image.
pub fn safe_image_src(raw: &str) -> Option<String> {
    let href = safe_href(raw)?;
    if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }
    Some(href)
}

/// A path with no scheme: no whitespace and no `:` in its first segment.
fn is_bare_relative(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let head = value.split(['/', '?', '#']).next().unwrap_or_default();
    !head.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative_and_web_urls() {
        assert_eq!(safe_href("/contact").as_deref(), Some("/contact"));
        assert_eq!(safe_href(" #form ").as_deref(), Some("#form"));
        assert_eq!(
            safe_href("https://example.com/a?b=1").as_deref(),
            Some("https://example.com/a?b=1")
        );
        assert_eq!(
            safe_href("mailto:hi@example.com").as_deref(),
            Some("mailto:hi@example.com")
        );
        assert_eq!(safe_href("tel:+1-555-0100").as_deref(), Some("tel:+1-555-0100"));
    }

    #[test]
    fn accepts_bare_relative_paths() {
        assert_eq!(safe_href("contact").as_deref(), Some("contact"));
        assert_eq!(safe_href("../faq?q=1").as_deref(), Some("../faq?q=1"));
        assert_eq!(safe_href("pricing#plans").as_deref(), Some("pricing#plans"));
    }

    #[test]
    fn rejects_script_and_protocol_relative_urls() {
        assert!(safe_href("javascript:alert(1)").is_none());
        assert!(safe_href("//evil.example").is_none());
        assert!(safe_href("").is_none());
        assert!(safe_href("not a url").is_none());
        assert!(safe_href("/\\evil.example").is_none());
        assert!(safe_href("data:text/html,hi").is_none());
    }

    #[test]
    fn image_sources_exclude_fragments_mail_and_phone() {
        assert!(safe_image_src("#x").is_none());
        assert!(safe_image_src("mailto:a@b.c").is_none());
        assert!(safe_image_src("tel:+15550100").is_none());
        assert_eq!(safe_image_src("img/a.png").as_deref(), Some("img/a.png"));
        assert_eq!(
            safe_image_src("https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }
}
