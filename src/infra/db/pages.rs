use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{PagesRepo, RepoError},
    domain::entities::{NavigablePage, PageRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PageRow {
    id: Uuid,
    title: String,
    slug: String,
    meta_description: Option<String>,
    published: bool,
    order_index: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PageRow> for PageRecord {
    fn from(row: PageRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            meta_description: row.meta_description,
            published: row.published,
            order_index: row.order_index,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NavigablePageRow {
    id: Uuid,
    title: String,
    slug: String,
    published: bool,
}

impl From<NavigablePageRow> for NavigablePage {
    fn from(row: NavigablePageRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            published: row.published,
        }
    }
}

#[async_trait]
impl PagesRepo for PostgresRepositories {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, RepoError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, title, slug, meta_description, published, order_index,
                   created_at, updated_at
            FROM pages
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PageRecord::from))
    }

    async fn list_navigable_pages(&self) -> Result<Vec<NavigablePage>, RepoError> {
        let rows = sqlx::query_as::<_, NavigablePageRow>(
            r#"
            SELECT id, title, slug, published
            FROM pages
            ORDER BY order_index, title, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(NavigablePage::from).collect())
    }
}
