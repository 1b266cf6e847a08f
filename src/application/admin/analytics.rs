use std::sync::Arc;

use crate::application::error::HttpError;
use crate::application::repos::{AnalyticsRepo, PagesRepo, SubmissionsRepo};
use crate::domain::entities::AnalyticsCounterRecord;
use crate::domain::slug::{href_for_slug, is_root};
use crate::presentation::admin::views::{
    AnalyticsDashboardView, AnalyticsRowView, format_timestamp,
};

const SOURCE: &str = "application::admin::analytics::AdminAnalyticsService";

#[derive(Clone)]
pub struct AdminAnalyticsService {
    analytics: Arc<dyn AnalyticsRepo>,
    pages: Arc<dyn PagesRepo>,
    submissions: Arc<dyn SubmissionsRepo>,
}

/// Site-wide totals shown above the per-page rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteTotals {
    pub pages: usize,
    pub submissions: usize,
}

impl AdminAnalyticsService {
    pub fn new(
        analytics: Arc<dyn AnalyticsRepo>,
        pages: Arc<dyn PagesRepo>,
        submissions: Arc<dyn SubmissionsRepo>,
    ) -> Self {
        Self {
            analytics,
            pages,
            submissions,
        }
    }

    pub async fn dashboard(&self) -> Result<AnalyticsDashboardView, HttpError> {
        let counters = self
            .analytics
            .list_counters()
            .await
            .map_err(|err| HttpError::repo(SOURCE, "list_counters", err))?;

        // Drafts count too.
        let pages = self
            .pages
            .list_navigable_pages()
            .await
            .map_err(|err| HttpError::repo(SOURCE, "list_navigable_pages", err))?;

        let submissions = self
            .submissions
            .list_submissions()
            .await
            .map_err(|err| HttpError::repo(SOURCE, "list_submissions", err))?;

        let totals = SiteTotals {
            pages: pages.len(),
            submissions: submissions.len(),
        };

        Ok(build_dashboard(counters, totals))
    }
}

/// Rows sorted by views, most viewed first; ties break on slug.
pub fn build_dashboard(
    mut counters: Vec<AnalyticsCounterRecord>,
    totals: SiteTotals,
) -> AnalyticsDashboardView {
    counters.sort_by(|a, b| {
        b.view_count
            .cmp(&a.view_count)
            .then_with(|| a.page_slug.cmp(&b.page_slug))
    });

    let total_views = counters
        .iter()
        .fold(0_i64, |total, counter| total.saturating_add(counter.view_count));

    let rows = counters
        .iter()
        .map(|counter| AnalyticsRowView {
            label: page_label(&counter.page_slug),
            href: href_for_slug(&counter.page_slug),
            view_count: counter.view_count,
            last_viewed: format_timestamp(counter.last_viewed_at),
        })
        .collect();

    AnalyticsDashboardView {
        page_count: totals.pages,
        submission_count: totals.submissions,
        total_views,
        tracked_pages: counters.len(),
        rows,
    }
}

fn page_label(slug: &str) -> String {
    if is_root(slug) {
        "Home".to_string()
    } else {
        format!("/{slug}")
    }
}
