use std::sync::Arc;

use tracing::warn;

use crate::application::repos::{DesignRepo, PagesRepo};
use crate::domain::design::DesignTokens;
use crate::domain::entities::NavigablePage;
use crate::domain::slug::href_for_slug;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const SOURCE: &str = "application::chrome::ChromeService";

/// Site-wide identity used when a page does not override it.
#[derive(Debug, Clone)]
pub struct SiteIdentity {
    pub brand_title: String,
    pub default_title: String,
    pub default_description: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            brand_title: "ModernCMS".to_string(),
            default_title: "Modern Website".to_string(),
            default_description: "A modern website with a custom admin CMS".to_string(),
        }
    }
}

/// Builds the layout shared by every public page. Store failures degrade to
/// an empty navigation and the default design tokens.
#[derive(Clone)]
pub struct ChromeService {
    pages: Arc<dyn PagesRepo>,
    design: Arc<dyn DesignRepo>,
    identity: SiteIdentity,
}

impl ChromeService {
    pub fn new(
        pages: Arc<dyn PagesRepo>,
        design: Arc<dyn DesignRepo>,
        identity: SiteIdentity,
    ) -> Self {
        Self {
            pages,
            design,
            identity,
        }
    }

    pub async fn load(&self) -> LayoutChrome {
        let navigation = match self.pages.list_navigable_pages().await {
            Ok(pages) => build_navigation(&pages),
            Err(err) => {
                warn!(
                    target = SOURCE,
                    error = %err,
                    "failed to load navigation, rendering without it"
                );
                NavigationView::default()
            }
        };

        let tokens = match self.design.list_design_settings().await {
            Ok(settings) => DesignTokens::from_settings(&settings),
            Err(err) => {
                warn!(
                    target = SOURCE,
                    error = %err,
                    "failed to load design settings, using defaults"
                );
                DesignTokens::default()
            }
        };

        LayoutChrome {
            brand: BrandView {
                title: self.identity.brand_title.clone(),
                href: "/".to_string(),
            },
            navigation,
            footer: FooterView {
                copy: self.identity.brand_title.clone(),
            },
            meta: PageMetaView {
                title: self.identity.default_title.clone(),
                description: self.identity.default_description.clone(),
            },
            design_css: tokens.css_variables(),
        }
    }
}

/// Published pages in store order; the root page links to `/`.
pub fn build_navigation(pages: &[NavigablePage]) -> NavigationView {
    let entries = pages
        .iter()
        .filter(|page| page.published)
        .map(|page| NavigationLinkView {
            label: page.title.clone(),
            href: href_for_slug(&page.slug),
            is_active: false,
        })
        .collect();

    NavigationView { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::application::repos::RepoError;
    use crate::domain::entities::{DesignSettingRecord, PageRecord};

    fn nav(title: &str, slug: &str, published: bool) -> NavigablePage {
        NavigablePage {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slug.to_string(),
            published,
        }
    }

    struct StubPages(Result<Vec<NavigablePage>, ()>);

    #[async_trait]
    impl PagesRepo for StubPages {
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<PageRecord>, RepoError> {
            unreachable!("not used in these tests")
        }

        async fn list_navigable_pages(&self) -> Result<Vec<NavigablePage>, RepoError> {
            self.0
                .clone()
                .map_err(|_| RepoError::from_persistence("pages unavailable"))
        }
    }

    struct StubDesign(Result<Vec<DesignSettingRecord>, ()>);

    #[async_trait]
    impl DesignRepo for StubDesign {
        async fn list_design_settings(&self) -> Result<Vec<DesignSettingRecord>, RepoError> {
            self.0
                .clone()
                .map_err(|_| RepoError::from_persistence("design unavailable"))
        }
    }

    #[test]
    fn navigation_keeps_published_pages_in_order() {
        let view = build_navigation(&[
            nav("Home", "home", true),
            nav("Draft", "draft", false),
            nav("About", "about", true),
        ]);
        let links: Vec<_> = view
            .entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.href.as_str()))
            .collect();
        assert_eq!(links, vec![("Home", "/"), ("About", "/about")]);
    }

    #[tokio::test]
    async fn chrome_applies_design_settings() {
        let service = ChromeService::new(
            Arc::new(StubPages(Ok(vec![nav("About", "about", true)]))),
            Arc::new(StubDesign(Ok(vec![DesignSettingRecord {
                id: Uuid::new_v4(),
                name: "colors".into(),
                value: json!({ "primary": "#101010" }),
                updated_at: OffsetDateTime::UNIX_EPOCH,
            }]))),
            SiteIdentity::default(),
        );

        let chrome = service.load().await;
        assert_eq!(chrome.brand.title, "ModernCMS");
        assert_eq!(chrome.navigation.entries.len(), 1);
        assert!(chrome.design_css.contains("--color-primary: #101010;"));
        assert_eq!(chrome.meta.title, "Modern Website");
    }

    #[tokio::test]
    async fn chrome_degrades_when_the_store_fails() {
        let service = ChromeService::new(
            Arc::new(StubPages(Err(()))),
            Arc::new(StubDesign(Err(()))),
            SiteIdentity::default(),
        );

        let chrome = service.load().await;
        assert!(chrome.navigation.is_empty());
        assert_eq!(chrome.design_css, DesignTokens::default().css_variables());
    }
}
