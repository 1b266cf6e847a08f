use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{AnalyticsRepo, RepoError},
    domain::entities::AnalyticsCounterRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CounterRow {
    id: Uuid,
    page_slug: String,
    view_count: i64,
    last_viewed_at: OffsetDateTime,
}

impl From<CounterRow> for AnalyticsCounterRecord {
    fn from(row: CounterRow) -> Self {
        Self {
            id: row.id,
            page_slug: row.page_slug,
            view_count: row.view_count,
            last_viewed_at: row.last_viewed_at,
        }
    }
}

#[async_trait]
impl AnalyticsRepo for PostgresRepositories {
    async fn get_counter(&self, slug: &str) -> Result<Option<AnalyticsCounterRecord>, RepoError> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, page_slug, view_count, last_viewed_at
            FROM analytics
            WHERE page_slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AnalyticsCounterRecord::from))
    }

    async fn upsert_counter(
        &self,
        slug: &str,
        view_count: i64,
        viewed_at: OffsetDateTime,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO analytics (page_slug, view_count, last_viewed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (page_slug) DO UPDATE
            SET view_count = EXCLUDED.view_count,
                last_viewed_at = EXCLUDED.last_viewed_at
            "#,
        )
        .bind(slug)
        .bind(view_count)
        .bind(viewed_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn increment_counter(
        &self,
        slug: &str,
        viewed_at: OffsetDateTime,
    ) -> Result<AnalyticsCounterRecord, RepoError> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            INSERT INTO analytics (page_slug, view_count, last_viewed_at)
            VALUES ($1, 1, $2)
            ON CONFLICT (page_slug) DO UPDATE
            SET view_count = analytics.view_count + 1,
                last_viewed_at = EXCLUDED.last_viewed_at
            RETURNING id, page_slug, view_count, last_viewed_at
            "#,
        )
        .bind(slug)
        .bind(viewed_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_counters(&self) -> Result<Vec<AnalyticsCounterRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, page_slug, view_count, last_viewed_at
            FROM analytics
            ORDER BY view_count DESC, page_slug
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(AnalyticsCounterRecord::from).collect())
    }
}
