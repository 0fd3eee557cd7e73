//! Catalog rows referenced by the escape award paths.

use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A row from the `escape_stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapeStory {
    pub id: DbId,
    pub title: String,
    pub chapter_count: i32,
    pub created_at: Timestamp,
}
