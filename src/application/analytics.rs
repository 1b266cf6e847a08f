//! Page view counter.
//!
//! Recording a view is best effort: every failure is logged and counted, and
//! none reaches the caller, so a broken counter never blocks a page.

use std::{str::FromStr, sync::Arc};

use metrics::counter;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::application::repos::{AnalyticsRepo, RepoError};

pub const METRIC_PAGE_VIEWS: &str = "vitrine_page_views_total";
pub const METRIC_PAGE_VIEW_FAILURES: &str = "vitrine_page_view_failures_total";

const SOURCE: &str = "application::analytics::ViewCounter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterMode {
    /// One conditional insert-or-increment statement.
    #[default]
    Atomic,
    /// Read the counter, then write `count + 1` (or 1) back.
    ///
    /// Not safe under concurrency: two requests reading the same count both
    /// write `count + 1` and one view is lost.
    ReadModifyWrite,
}

impl CounterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CounterMode::Atomic => "atomic",
            CounterMode::ReadModifyWrite => "read_modify_write",
        }
    }
}

impl FromStr for CounterMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "atomic" => Ok(CounterMode::Atomic),
            "read_modify_write" => Ok(CounterMode::ReadModifyWrite),
            other => Err(format!(
                "unknown counter mode `{other}` (expected atomic|read_modify_write)"
            )),
        }
    }
}

#[derive(Clone)]
pub struct ViewCounter {
    analytics: Arc<dyn AnalyticsRepo>,
    mode: CounterMode,
}

impl ViewCounter {
    pub fn new(analytics: Arc<dyn AnalyticsRepo>, mode: CounterMode) -> Self {
        Self { analytics, mode }
    }

    pub fn mode(&self) -> CounterMode {
        self.mode
    }

    pub async fn record_view(&self, slug: &str) {
        self.record_view_at(slug, OffsetDateTime::now_utc()).await;
    }

    pub async fn record_view_at(&self, slug: &str, now: OffsetDateTime) {
        let outcome = match self.mode {
            CounterMode::Atomic => self
                .analytics
                .increment_counter(slug, now)
                .await
                .map(|_| ()),
            CounterMode::ReadModifyWrite => self.read_modify_write(slug, now).await,
        };

        match outcome {
            Ok(()) => {
                counter!(METRIC_PAGE_VIEWS).increment(1);
                debug!(
                    target = SOURCE,
                    slug,
                    mode = self.mode.as_str(),
                    "page view recorded"
                );
            }
            Err(err) => {
                counter!(METRIC_PAGE_VIEW_FAILURES).increment(1);
                warn!(
                    target = SOURCE,
                    slug,
                    mode = self.mode.as_str(),
                    error = %err,
                    "failed to record page view"
                );
            }
        }
    }

    async fn read_modify_write(&self, slug: &str, now: OffsetDateTime) -> Result<(), RepoError> {
        let next = match self.analytics.get_counter(slug).await? {
            Some(existing) => existing.view_count.saturating_add(1),
            None => 1,
        };
        self.analytics.upsert_counter(slug, next, now).await
    }
}
