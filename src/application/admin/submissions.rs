use std::sync::Arc;

use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::repos::{RepoError, SubmissionsRepo};
use crate::domain::entities::FormSubmissionRecord;
use crate::presentation::admin::views::{SubmissionRowView, SubmissionsView, format_timestamp};

const SOURCE: &str = "application::admin::submissions::AdminSubmissionsService";

#[derive(Clone)]
pub struct AdminSubmissionsService {
    submissions: Arc<dyn SubmissionsRepo>,
}

impl AdminSubmissionsService {
    pub fn new(submissions: Arc<dyn SubmissionsRepo>) -> Self {
        Self { submissions }
    }

    pub async fn list(&self) -> Result<SubmissionsView, HttpError> {
        let records = self
            .submissions
            .list_submissions()
            .await
            .map_err(|err| HttpError::repo(SOURCE, "list_submissions", err))?;

        Ok(build_submissions_view(records))
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), HttpError> {
        self.submissions
            .mark_read(id)
            .await
            .map_err(|err| submission_error(id, "mark_read", err))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), HttpError> {
        self.submissions
            .delete_submission(id)
            .await
            .map_err(|err| submission_error(id, "delete_submission", err))?;

        info!(
            target = SOURCE,
            submission_id = %id,
            "submission deleted"
        );
        Ok(())
    }
}

fn submission_error(id: Uuid, operation: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::NotFound => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Submission not found",
            format!("submission `{id}` does not exist"),
        ),
        other => HttpError::repo(SOURCE, operation, other),
    }
}

pub fn build_submissions_view(mut records: Vec<FormSubmissionRecord>) -> SubmissionsView {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let unread_count = records.iter().filter(|record| !record.read).count();
    let rows = records
        .into_iter()
        .map(|record| SubmissionRowView {
            id: record.id,
            received: format_timestamp(record.created_at),
            name: record.name,
            email: record.email,
            message: record.message,
            read: record.read,
        })
        .collect();

    SubmissionsView { unread_count, rows }
}
