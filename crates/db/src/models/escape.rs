//! Escape completion and story progress models.

use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `completed_escapes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedEscape {
    pub id: DbId,
    pub user_id: DbId,
    pub story_id: DbId,
    pub completed_at: Timestamp,
}

/// A row from the `user_story_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub story_id: DbId,
    pub current_chapter: i32,
    pub status: String,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// Result of marking a story complete.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// This call created the completion row.
    Created(CompletedEscape),
    /// The story was already completed; progress was re-synced.
    AlreadyCompleted,
}
