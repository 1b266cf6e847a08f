use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, SubmissionsRepo},
    domain::{entities::FormSubmissionRecord, submissions::NewSubmission},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: String,
    email: String,
    message: String,
    created_at: OffsetDateTime,
    read: bool,
}

impl From<SubmissionRow> for FormSubmissionRecord {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
            read: row.read,
        }
    }
}

#[async_trait]
impl SubmissionsRepo for PostgresRepositories {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<FormSubmissionRecord, RepoError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO form_submissions (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at, read
            "#,
        )
        .bind(submission.name)
        .bind(submission.email)
        .bind(submission.message)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_submissions(&self) -> Result<Vec<FormSubmissionRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT id, name, email, message, created_at, read
            FROM form_submissions
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FormSubmissionRecord::from).collect())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE form_submissions
            SET read = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
