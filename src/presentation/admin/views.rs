use askama::Template;
use time::{OffsetDateTime, macros::format_description};
use uuid::Uuid;

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand_title: String,
    pub navigation: Vec<AdminNavigationItemView>,
    pub page_title: String,
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self { chrome, content }
    }
}

#[derive(Clone)]
pub struct AnalyticsRowView {
    pub label: String,
    pub href: String,
    pub view_count: i64,
    pub last_viewed: String,
}

#[derive(Clone)]
pub struct AnalyticsDashboardView {
    pub page_count: usize,
    pub submission_count: usize,
    pub total_views: i64,
    pub tracked_pages: usize,
    pub rows: Vec<AnalyticsRowView>,
}

impl AnalyticsDashboardView {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/analytics.html")]
pub struct AnalyticsDashboardTemplate {
    pub view: AdminLayout<AnalyticsDashboardView>,
}

#[derive(Clone)]
pub struct SubmissionRowView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received: String,
    pub read: bool,
}

#[derive(Clone)]
pub struct SubmissionsView {
    pub unread_count: usize,
    pub rows: Vec<SubmissionRowView>,
}

impl SubmissionsView {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/submissions.html")]
pub struct SubmissionsTemplate {
    pub view: AdminLayout<SubmissionsView>,
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    value
        .to_offset(time::UtcOffset::UTC)
        .format(format)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}
