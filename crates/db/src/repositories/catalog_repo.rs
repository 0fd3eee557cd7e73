//! Repository for the `places` and `escape_stories` tables.
//!
//! Catalog management lives elsewhere; the reward engine only needs to
//! resolve ids, plus creation for seeding.

use escapade_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{EscapeStory, Place};

const PLACE_COLUMNS: &str = "id, name, created_at";
const STORY_COLUMNS: &str = "id, title, chapter_count, created_at";

pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn create_place(pool: &PgPool, name: &str) -> Result<Place, sqlx::Error> {
        let query = format!("INSERT INTO places (name) VALUES ($1) RETURNING {PLACE_COLUMNS}");
        sqlx::query_as::<_, Place>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_place(pool: &PgPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create_story(
        pool: &PgPool,
        title: &str,
        chapter_count: i32,
    ) -> Result<EscapeStory, sqlx::Error> {
        let query = format!(
            "INSERT INTO escape_stories (title, chapter_count) VALUES ($1, $2) \
             RETURNING {STORY_COLUMNS}"
        );
        sqlx::query_as::<_, EscapeStory>(&query)
            .bind(title)
            .bind(chapter_count)
            .fetch_one(pool)
            .await
    }

    pub async fn find_story(pool: &PgPool, id: DbId) -> Result<Option<EscapeStory>, sqlx::Error> {
        let query = format!("SELECT {STORY_COLUMNS} FROM escape_stories WHERE id = $1");
        sqlx::query_as::<_, EscapeStory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
