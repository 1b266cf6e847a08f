use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{DesignRepo, RepoError},
    domain::entities::DesignSettingRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct DesignSettingRow {
    id: Uuid,
    name: String,
    value: serde_json::Value,
    updated_at: OffsetDateTime,
}

impl From<DesignSettingRow> for DesignSettingRecord {
    fn from(row: DesignSettingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            value: row.value,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl DesignRepo for PostgresRepositories {
    async fn list_design_settings(&self) -> Result<Vec<DesignSettingRecord>, RepoError> {
        let rows = sqlx::query_as::<_, DesignSettingRow>(
            r#"
            SELECT id, name, value, updated_at
            FROM design_settings
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(DesignSettingRecord::from).collect())
    }
}
