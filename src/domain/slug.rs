//! Page slugs and the reserved root slug.
//!
//! The page stored under [`ROOT_PAGE_SLUG`] is served at `/` and must never be
//! reachable through its literal path. Any other single path segment is looked
//! up as given; whether a page exists is the content store's call.

use thiserror::Error;

pub const ROOT_PAGE_SLUG: &str = "home";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("`{input}` spans more than one path segment")]
    Nested { input: String },
    #[error("`{ROOT_PAGE_SLUG}` is reserved for the site root")]
    Reserved,
}

pub fn is_root(slug: &str) -> bool {
    slug == ROOT_PAGE_SLUG
}

/// Validate a slug taken from a request path.
///
/// The reserved root slug is rejected so `/home` resolves like any missing page.
pub fn parse_path_slug(segment: &str) -> Result<&str, SlugError> {
    if segment.is_empty() {
        return Err(SlugError::Empty);
    }
    if segment.contains('/') {
        return Err(SlugError::Nested {
            input: segment.to_string(),
        });
    }
    if is_root(segment) {
        return Err(SlugError::Reserved);
    }
    Ok(segment)
}

/// Public link for a page slug.
pub fn href_for_slug(slug: &str) -> String {
    if is_root(slug) {
        "/".to_string()
    } else {
        format!("/{slug}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_slug_links_to_site_root() {
        assert_eq!(href_for_slug("home"), "/");
        assert_eq!(href_for_slug("about"), "/about");
    }

    #[test]
    fn reserved_slug_is_rejected_from_paths() {
        assert_eq!(parse_path_slug("home"), Err(SlugError::Reserved));
        assert_eq!(parse_path_slug("about-us"), Ok("about-us"));
    }

    #[test]
    fn any_single_segment_is_accepted_as_given() {
        assert_eq!(parse_path_slug("about_us"), Ok("about_us"));
        assert_eq!(parse_path_slug("Pricing"), Ok("Pricing"));
        assert_eq!(parse_path_slug("a--b"), Ok("a--b"));
        assert_eq!(parse_path_slug("Home"), Ok("Home"));
    }

    #[test]
    fn empty_and_nested_segments_are_rejected() {
        assert_eq!(parse_path_slug(""), Err(SlugError::Empty));
        assert!(matches!(
            parse_path_slug("a/b"),
            Err(SlugError::Nested { .. })
        ));
    }
}
