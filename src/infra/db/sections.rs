use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, SectionsRepo},
    domain::{entities::SectionRecord, sections::SectionContent},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SectionRow {
    id: Uuid,
    page_id: Uuid,
    section_type: String,
    title: Option<String>,
    content: Option<serde_json::Value>,
    order_index: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<SectionRow> for SectionRecord {
    fn from(row: SectionRow) -> Self {
        let payload = row.content.unwrap_or(serde_json::Value::Null);
        let content = SectionContent::from_stored(&row.section_type, payload);

        if let SectionContent::Malformed { kind, reason } = &content {
            warn!(
                target = "infra::db::sections",
                section_id = %row.id,
                page_id = %row.page_id,
                kind = kind.as_str(),
                reason = %reason,
                "stored section payload is malformed and will not render"
            );
        }

        Self {
            id: row.id,
            page_id: row.page_id,
            title: row.title,
            content,
            order_index: row.order_index,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SectionsRepo for PostgresRepositories {
    async fn list_sections(&self, page_id: Uuid) -> Result<Vec<SectionRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT id, page_id, type AS section_type, title, content, order_index,
                   created_at, updated_at
            FROM sections
            WHERE page_id = $1
            ORDER BY order_index, created_at, id
            "#,
        )
        .bind(page_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SectionRecord::from).collect())
    }
}
