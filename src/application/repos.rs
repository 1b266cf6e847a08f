//! Repository traits describing the content store.
//!
//! Every trait is object safe and used as `Arc<dyn …>` so services can be
//! wired to Postgres in production and to in-memory stores in tests.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    AnalyticsCounterRecord, DesignSettingRecord, FormSubmissionRecord, NavigablePage, PageRecord,
    SectionRecord,
};
use crate::domain::submissions::NewSubmission;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait PagesRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError>;

    /// All pages in `order_index` order. Callers filter on `published`.
    async fn list_navigable_pages(&self) -> Result<Vec<NavigablePage>, RepoError>;
}

#[async_trait]
pub trait SectionsRepo: Send + Sync {
    /// Sections of a page in ascending `order_index` order.
    async fn list_sections(&self, page_id: Uuid) -> Result<Vec<SectionRecord>, RepoError>;
}

#[async_trait]
pub trait AnalyticsRepo: Send + Sync {
    async fn get_counter(&self, slug: &str) -> Result<Option<AnalyticsCounterRecord>, RepoError>;

    /// Write `view_count` as given, creating the counter when missing.
    async fn upsert_counter(
        &self,
        slug: &str,
        view_count: i64,
        viewed_at: OffsetDateTime,
    ) -> Result<(), RepoError>;

    /// Add one view in a single statement, creating the counter at 1 when missing.
    async fn increment_counter(
        &self,
        slug: &str,
        viewed_at: OffsetDateTime,
    ) -> Result<AnalyticsCounterRecord, RepoError>;

    /// Every counter, highest `view_count` first.
    async fn list_counters(&self) -> Result<Vec<AnalyticsCounterRecord>, RepoError>;
}

#[async_trait]
pub trait DesignRepo: Send + Sync {
    async fn list_design_settings(&self) -> Result<Vec<DesignSettingRecord>, RepoError>;
}

#[async_trait]
pub trait SubmissionsRepo: Send + Sync {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<FormSubmissionRecord, RepoError>;

    /// Newest first.
    async fn list_submissions(&self) -> Result<Vec<FormSubmissionRecord>, RepoError>;

    /// Returns [`RepoError::NotFound`] when no submission has this id.
    async fn mark_read(&self, id: Uuid) -> Result<(), RepoError>;

    /// Returns [`RepoError::NotFound`] when no submission has this id.
    async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
