#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;
use vitrine::{
    application::{
        admin::{
            analytics::AdminAnalyticsService, chrome::AdminChromeService,
            submissions::AdminSubmissionsService,
        },
        analytics::{CounterMode, ViewCounter},
        chrome::{ChromeService, SiteIdentity},
        contact::ContactService,
        page::PageService,
        repos::{
            AnalyticsRepo, DesignRepo, HealthRepo, PagesRepo, RepoError, SectionsRepo,
            SubmissionsRepo,
        },
    },
    domain::{
        entities::{
            AnalyticsCounterRecord, DesignSettingRecord, FormSubmissionRecord, NavigablePage,
            PageRecord, SectionRecord,
        },
        sections::SectionContent,
        submissions::NewSubmission,
    },
    infra::http::{AdminState, HttpState, ServedPage, build_admin_router, build_router},
};

pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Default)]
struct State {
    pages: Vec<PageRecord>,
    sections: Vec<SectionRecord>,
    counters: HashMap<String, AnalyticsCounterRecord>,
    submissions: Vec<FormSubmissionRecord>,
}

/// In-memory content store implementing every repository trait.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_page(&self, slug: &str, title: &str, published: bool) -> Uuid {
        let mut state = self.state.lock().expect("store lock");
        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let order_index = state.pages.len() as i32;
        state.pages.push(PageRecord {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            meta_description: None,
            published,
            order_index,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_section(&self, page_id: Uuid, tag: &str, payload: Value, order_index: i32) {
        let mut state = self.state.lock().expect("store lock");
        let now = OffsetDateTime::now_utc();
        state.sections.push(SectionRecord {
            id: Uuid::new_v4(),
            page_id,
            title: None,
            content: SectionContent::from_stored(tag, payload),
            order_index,
            created_at: now,
            updated_at: now,
        });
    }

    pub fn set_counter(&self, slug: &str, view_count: i64) {
        let mut state = self.state.lock().expect("store lock");
        state.counters.insert(
            slug.to_string(),
            AnalyticsCounterRecord {
                id: Uuid::new_v4(),
                page_slug: slug.to_string(),
                view_count,
                last_viewed_at: OffsetDateTime::now_utc(),
            },
        );
    }

    pub fn counter(&self, slug: &str) -> Option<i64> {
        let state = self.state.lock().expect("store lock");
        state.counters.get(slug).map(|record| record.view_count)
    }

    pub fn add_submission(&self, name: &str, email: &str, message: &str) -> Uuid {
        let mut state = self.state.lock().expect("store lock");
        let id = Uuid::new_v4();
        state.submissions.push(FormSubmissionRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            created_at: OffsetDateTime::now_utc(),
            read: false,
        });
        id
    }

    pub fn submissions(&self) -> Vec<FormSubmissionRecord> {
        self.state.lock().expect("store lock").submissions.clone()
    }
}

#[async_trait]
impl PagesRepo for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.pages.iter().find(|page| page.slug == slug).cloned())
    }

    async fn list_navigable_pages(&self) -> Result<Vec<NavigablePage>, RepoError> {
        let state = self.state.lock().expect("store lock");
        let mut pages = state.pages.clone();
        pages.sort_by_key(|page| page.order_index);
        Ok(pages
            .into_iter()
            .map(|page| NavigablePage {
                id: page.id,
                title: page.title,
                slug: page.slug,
                published: page.published,
            })
            .collect())
    }
}

#[async_trait]
impl SectionsRepo for MemoryStore {
    async fn list_sections(&self, page_id: Uuid) -> Result<Vec<SectionRecord>, RepoError> {
        let state = self.state.lock().expect("store lock");
        let mut sections: Vec<SectionRecord> = state
            .sections
            .iter()
            .filter(|section| section.page_id == page_id)
            .cloned()
            .collect();
        sections.sort_by_key(|section| section.order_index);
        Ok(sections)
    }
}

#[async_trait]
impl AnalyticsRepo for MemoryStore {
    async fn get_counter(&self, slug: &str) -> Result<Option<AnalyticsCounterRecord>, RepoError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.counters.get(slug).cloned())
    }

    async fn upsert_counter(
        &self,
        slug: &str,
        view_count: i64,
        viewed_at: OffsetDateTime,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let record = state
            .counters
            .entry(slug.to_string())
            .or_insert_with(|| AnalyticsCounterRecord {
                id: Uuid::new_v4(),
                page_slug: slug.to_string(),
                view_count: 0,
                last_viewed_at: viewed_at,
            });
        record.view_count = view_count;
        record.last_viewed_at = viewed_at;
        Ok(())
    }

    async fn increment_counter(
        &self,
        slug: &str,
        viewed_at: OffsetDateTime,
    ) -> Result<AnalyticsCounterRecord, RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let record = state
            .counters
            .entry(slug.to_string())
            .or_insert_with(|| AnalyticsCounterRecord {
                id: Uuid::new_v4(),
                page_slug: slug.to_string(),
                view_count: 0,
                last_viewed_at: viewed_at,
            });
        record.view_count += 1;
        record.last_viewed_at = viewed_at;
        Ok(record.clone())
    }

    async fn list_counters(&self) -> Result<Vec<AnalyticsCounterRecord>, RepoError> {
        let state = self.state.lock().expect("store lock");
        Ok(state.counters.values().cloned().collect())
    }
}

#[async_trait]
impl DesignRepo for MemoryStore {
    async fn list_design_settings(&self) -> Result<Vec<DesignSettingRecord>, RepoError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl SubmissionsRepo for MemoryStore {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<FormSubmissionRecord, RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let record = FormSubmissionRecord {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            message: submission.message,
            created_at: OffsetDateTime::now_utc(),
            read: false,
        };
        state.submissions.push(record.clone());
        Ok(record)
    }

    async fn list_submissions(&self) -> Result<Vec<FormSubmissionRecord>, RepoError> {
        Ok(self.submissions())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let record = state
            .submissions
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(RepoError::NotFound)?;
        record.read = true;
        Ok(())
    }

    async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().expect("store lock");
        let before = state.submissions.len();
        state.submissions.retain(|record| record.id != id);
        if state.submissions.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl HealthRepo for MemoryStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

pub fn public_router(store: &Arc<MemoryStore>) -> Router {
    let state = HttpState {
        pages: Arc::new(PageService::new(store.clone(), store.clone())),
        chrome: Arc::new(ChromeService::new(
            store.clone(),
            store.clone(),
            SiteIdentity::default(),
        )),
        views: Arc::new(ViewCounter::new(store.clone(), CounterMode::Atomic)),
        contact: Arc::new(ContactService::new(store.clone(), MAX_MESSAGE_CHARS)),
        health: store.clone(),
    };
    build_router(state)
}

pub fn admin_router(store: &Arc<MemoryStore>) -> Router {
    let state = AdminState {
        chrome: Arc::new(AdminChromeService::new("ModernCMS")),
        analytics: Arc::new(AdminAnalyticsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        submissions: Arc::new(AdminSubmissionsService::new(store.clone())),
        health: store.clone(),
    };
    build_admin_router(state)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(router, request).await
}

/// Status plus the page the response was attributed to, if any.
pub async fn served_page(router: &Router, uri: &str) -> (StatusCode, Option<ServedPage>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    (response.status(), response.extensions().get::<ServedPage>().cloned())
}

pub async fn post_form(router: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    (
        status,
        String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    )
}
