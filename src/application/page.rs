use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use tracing::warn;

use crate::application::error::HttpError;
use crate::application::render::render_sections;
use crate::application::repos::{PagesRepo, SectionsRepo};
use crate::domain::entities::PublishedPage;
use crate::domain::slug::{ROOT_PAGE_SLUG, parse_path_slug};
use crate::presentation::views::PageView;

pub const METRIC_PAGE_RESOLVE_MS: &str = "vitrine_page_resolve_ms";

const SOURCE: &str = "application::page::PageService";

/// Where a public request points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute {
    /// `/`, served from the page stored under the reserved root slug.
    Root,
    /// `/{slug}` with any single non-reserved segment.
    Slug(String),
    /// Anything that can never name a page, including `/home`.
    Unroutable,
}

impl PageRoute {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_start_matches('/');
        if trimmed.is_empty() {
            return PageRoute::Root;
        }
        match parse_path_slug(trimmed.strip_suffix('/').unwrap_or(trimmed)) {
            Ok(slug) => PageRoute::Slug(slug.to_string()),
            Err(_) => PageRoute::Unroutable,
        }
    }

    /// Slug whose stored page answers this route.
    pub fn page_slug(&self) -> Option<&str> {
        match self {
            PageRoute::Root => Some(ROOT_PAGE_SLUG),
            PageRoute::Slug(slug) => Some(slug),
            PageRoute::Unroutable => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            PageRoute::Slug(slug) => format!("/{slug}"),
            PageRoute::Root | PageRoute::Unroutable => "/".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct PageService {
    pages: Arc<dyn PagesRepo>,
    sections: Arc<dyn SectionsRepo>,
}

impl PageService {
    pub fn new(pages: Arc<dyn PagesRepo>, sections: Arc<dyn SectionsRepo>) -> Self {
        Self { pages, sections }
    }

    /// Resolve a route to a published page, or `None` for a uniform not-found.
    pub async fn resolve(&self, route: &PageRoute) -> Result<Option<PublishedPage>, HttpError> {
        let Some(slug) = route.page_slug() else {
            return Ok(None);
        };

        let started = Instant::now();
        let result = self.published_page(slug).await;
        histogram!(METRIC_PAGE_RESOLVE_MS).record(started.elapsed().as_secs_f64() * 1000.0);
        result
    }

    /// The page stored under `slug` with its sections, when it exists and is
    /// published. Absent and unpublished pages are indistinguishable.
    pub async fn published_page(&self, slug: &str) -> Result<Option<PublishedPage>, HttpError> {
        let record = self
            .pages
            .find_by_slug(slug)
            .await
            .map_err(|err| HttpError::repo(SOURCE, "find_by_slug", err))?;

        let Some(page) = record.filter(|page| page.published) else {
            return Ok(None);
        };

        let sections = match self.sections.list_sections(page.id).await {
            Ok(sections) => sections,
            Err(err) => {
                warn!(
                    target = SOURCE,
                    slug,
                    page_id = %page.id,
                    error = %err,
                    "failed to load sections, rendering page without them"
                );
                Vec::new()
            }
        };

        Ok(Some(PublishedPage { page, sections }))
    }

    pub fn page_view(&self, published: &PublishedPage) -> PageView {
        PageView {
            title: published.page.title.clone(),
            sections: render_sections(&published.sections),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::application::repos::RepoError;
    use crate::domain::entities::{NavigablePage, PageRecord, SectionRecord};
    use crate::domain::sections::SectionContent;

    fn page(slug: &str, published: bool) -> PageRecord {
        PageRecord {
            id: Uuid::new_v4(),
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            meta_description: None,
            published,
            order_index: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    struct StubPages {
        pages: Vec<PageRecord>,
        fail: bool,
    }

    #[async_trait]
    impl PagesRepo for StubPages {
        async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError> {
            if self.fail {
                return Err(RepoError::Timeout);
            }
            Ok(self.pages.iter().find(|page| page.slug == slug).cloned())
        }

        async fn list_navigable_pages(&self) -> Result<Vec<NavigablePage>, RepoError> {
            unreachable!("not used in these tests")
        }
    }

    #[derive(Default)]
    struct StubSections {
        sections: Vec<SectionRecord>,
        fail: bool,
        requested: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl SectionsRepo for StubSections {
        async fn list_sections(&self, page_id: Uuid) -> Result<Vec<SectionRecord>, RepoError> {
            self.requested.lock().unwrap().push(page_id);
            if self.fail {
                return Err(RepoError::from_persistence("sections unavailable"));
            }
            Ok(self
                .sections
                .iter()
                .filter(|section| section.page_id == page_id)
                .cloned()
                .collect())
        }
    }

    fn service(pages: Vec<PageRecord>, sections: StubSections) -> (PageService, Arc<StubSections>) {
        let sections = Arc::new(sections);
        let service = PageService::new(
            Arc::new(StubPages { pages, fail: false }),
            sections.clone(),
        );
        (service, sections)
    }

    #[test]
    fn routes_from_paths() {
        assert_eq!(PageRoute::from_path("/"), PageRoute::Root);
        assert_eq!(PageRoute::from_path(""), PageRoute::Root);
        assert_eq!(
            PageRoute::from_path("/about"),
            PageRoute::Slug("about".into())
        );
        assert_eq!(
            PageRoute::from_path("/about/"),
            PageRoute::Slug("about".into())
        );
        assert_eq!(PageRoute::from_path("/home"), PageRoute::Unroutable);
        assert_eq!(PageRoute::from_path("/a/b"), PageRoute::Unroutable);
        assert_eq!(
            PageRoute::from_path("/About_Us"),
            PageRoute::Slug("About_Us".into())
        );
        assert_eq!(PageRoute::Root.page_slug(), Some("home"));
    }

    #[tokio::test]
    async fn unpublished_and_missing_pages_are_not_found() {
        let (service, sections) = service(vec![page("draft", false)], StubSections::default());

        assert!(service.published_page("draft").await.unwrap().is_none());
        assert!(service.published_page("missing").await.unwrap().is_none());
        assert!(sections.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reserved_slug_route_never_reaches_the_store() {
        let (service, _) = service(vec![page("home", true)], StubSections::default());

        let home = PageRoute::from_path("/home");
        assert!(service.resolve(&home).await.unwrap().is_none());

        let root = service
            .resolve(&PageRoute::Root)
            .await
            .unwrap()
            .expect("root page");
        assert_eq!(root.page.slug, "home");
    }

    #[tokio::test]
    async fn section_failures_degrade_to_an_empty_page() {
        let about = page("about", true);
        let stub = StubSections {
            fail: true,
            ..StubSections::default()
        };
        let (service, _) = service(vec![about.clone()], stub);

        let published = service
            .published_page("about")
            .await
            .unwrap()
            .expect("page still resolves");
        assert_eq!(published.page, about);
        assert!(published.sections.is_empty());
    }

    #[tokio::test]
    async fn store_failures_surface_as_server_errors() {
        let service = PageService::new(
            Arc::new(StubPages {
                pages: Vec::new(),
                fail: true,
            }),
            Arc::new(StubSections::default()),
        );

        let err = service
            .published_page("about")
            .await
            .expect_err("store failure");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn page_view_renders_sections_in_order() {
        let about = page("about", true);
        let section = |order_index, tag: &str| SectionRecord {
            id: Uuid::new_v4(),
            page_id: about.id,
            title: None,
            content: SectionContent::from_stored(tag, json!({ "title": "t" })),
            order_index,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let stub = StubSections {
            sections: vec![section(0, "hero"), section(1, "unknown_x"), section(2, "features")],
            ..StubSections::default()
        };
        let (service, _) = service(vec![about], stub);

        let published = service.published_page("about").await.unwrap().unwrap();
        let view = service.page_view(&published);
        let kinds: Vec<_> = view.sections.iter().map(|section| section.kind()).collect();
        assert_eq!(view.title, "ABOUT");
        assert_eq!(kinds, vec!["hero", "features"]);
    }
}
