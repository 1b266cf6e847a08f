//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::sections::SectionContent;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub published: bool,
    pub order_index: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Minimal projection used to build the public navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigablePage {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub published: bool,
}

/// A stored section whose payload has already been resolved into its typed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRecord {
    pub id: Uuid,
    pub page_id: Uuid,
    pub title: Option<String>,
    pub content: SectionContent,
    pub order_index: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A published page together with its sections in render order.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedPage {
    pub page: PageRecord,
    pub sections: Vec<SectionRecord>,
}

/// View counter keyed by slug. Deliberately not a foreign key to `pages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsCounterRecord {
    pub id: Uuid,
    pub page_slug: String,
    pub view_count: i64,
    pub last_viewed_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSettingRecord {
    pub id: Uuid,
    pub name: String,
    pub value: serde_json::Value,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSubmissionRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
    pub read: bool,
}
