use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{RepoError, SubmissionsRepo};
use crate::domain::entities::FormSubmissionRecord;
use crate::domain::error::DomainError;
use crate::domain::submissions::ContactFormInput;

pub const METRIC_CONTACT_SUBMISSIONS: &str = "vitrine_contact_submissions_total";

const SOURCE: &str = "application::contact::ContactService";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("failed to store submission: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct ContactService {
    submissions: Arc<dyn SubmissionsRepo>,
    max_message_chars: usize,
}

impl ContactService {
    pub fn new(submissions: Arc<dyn SubmissionsRepo>, max_message_chars: usize) -> Self {
        Self {
            submissions,
            max_message_chars,
        }
    }

    pub async fn submit(
        &self,
        input: ContactFormInput,
    ) -> Result<FormSubmissionRecord, ContactError> {
        let submission = match input.validate(self.max_message_chars) {
            Ok(submission) => submission,
            Err(err) => {
                counter!(METRIC_CONTACT_SUBMISSIONS, "outcome" => "invalid").increment(1);
                return Err(err.into());
            }
        };

        match self.submissions.insert_submission(submission).await {
            Ok(record) => {
                counter!(METRIC_CONTACT_SUBMISSIONS, "outcome" => "stored").increment(1);
                info!(
                    target = SOURCE,
                    submission_id = %record.id,
                    "contact submission stored"
                );
                Ok(record)
            }
            Err(err) => {
                counter!(METRIC_CONTACT_SUBMISSIONS, "outcome" => "failed").increment(1);
                Err(err.into())
            }
        }
    }
}
