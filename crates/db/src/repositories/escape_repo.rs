//! Repository for `completed_escapes` and `user_story_progress`.

use escapade_core::escape::{StoryStatus, COMPLETION_CHAPTER};
use escapade_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::escape::{CompletedEscape, CompletionOutcome, UserStoryProgress};

const COLUMNS: &str = "id, user_id, story_id, completed_at";

const PROGRESS_COLUMNS: &str =
    "id, user_id, story_id, current_chapter, status, started_at, completed_at, updated_at";

pub struct EscapeRepo;

impl EscapeRepo {
    pub async fn find_completed(
        pool: &PgPool,
        user_id: DbId,
        story_id: DbId,
    ) -> Result<Option<CompletedEscape>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM completed_escapes WHERE user_id = $1 AND story_id = $2"
        );
        sqlx::query_as::<_, CompletedEscape>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_progress(
        pool: &PgPool,
        user_id: DbId,
        story_id: DbId,
    ) -> Result<Option<UserStoryProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_story_progress \
             WHERE user_id = $1 AND story_id = $2"
        );
        sqlx::query_as::<_, UserStoryProgress>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert the progress row for a fresh completion.
    ///
    /// The pointer is reset to the completion chapter and `started_at` is
    /// restamped, whatever the row held before.
    async fn record_completion_in(
        conn: &mut PgConnection,
        user_id: DbId,
        story_id: DbId,
    ) -> Result<UserStoryProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_story_progress \
                (user_id, story_id, current_chapter, status, started_at, completed_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) \
             ON CONFLICT (user_id, story_id) DO UPDATE SET \
                current_chapter = EXCLUDED.current_chapter, \
                status = EXCLUDED.status, \
                started_at = EXCLUDED.started_at, \
                completed_at = EXCLUDED.completed_at \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, UserStoryProgress>(&query)
            .bind(user_id)
            .bind(story_id)
            .bind(COMPLETION_CHAPTER)
            .bind(StoryStatus::Completed.as_str())
            .fetch_one(conn)
            .await
    }

    /// Re-sync the progress row of a story that was already completed.
    ///
    /// Only `status` and `completed_at` are touched on an existing row.
    async fn resync_completed_in(
        conn: &mut PgConnection,
        user_id: DbId,
        story_id: DbId,
    ) -> Result<UserStoryProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_story_progress \
                (user_id, story_id, current_chapter, status, started_at, completed_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) \
             ON CONFLICT (user_id, story_id) DO UPDATE SET \
                status = EXCLUDED.status, \
                completed_at = EXCLUDED.completed_at \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, UserStoryProgress>(&query)
            .bind(user_id)
            .bind(story_id)
            .bind(COMPLETION_CHAPTER)
            .bind(StoryStatus::Completed.as_str())
            .fetch_one(conn)
            .await
    }

    /// Mark a story completed for a user.
    ///
    /// The completion row and the progress row commit together; a fresh
    /// completion resets the chapter pointer to the first chapter. A repeat
    /// call re-syncs the progress row and reports
    /// [`CompletionOutcome::AlreadyCompleted`].
    pub async fn complete_story(
        pool: &PgPool,
        user_id: DbId,
        story_id: DbId,
    ) -> Result<CompletionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO completed_escapes (user_id, story_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, story_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, CompletedEscape>(&query)
            .bind(user_id)
            .bind(story_id)
            .fetch_optional(&mut *tx)
            .await?;

        let outcome = match created {
            Some(item) => {
                Self::record_completion_in(&mut tx, user_id, story_id).await?;
                CompletionOutcome::Created(item)
            }
            None => {
                Self::resync_completed_in(&mut tx, user_id, story_id).await?;
                CompletionOutcome::AlreadyCompleted
            }
        };
        tx.commit().await?;

        if matches!(outcome, CompletionOutcome::Created(_)) {
            tracing::info!(user_id, story_id, "Escape story completed");
        }
        Ok(outcome)
    }

    /// Move the pointer of a story that is not yet completed.
    ///
    /// A completed story is returned unchanged.
    pub async fn advance_progress(
        pool: &PgPool,
        user_id: DbId,
        story_id: DbId,
        chapter: i32,
    ) -> Result<UserStoryProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_story_progress \
                (user_id, story_id, current_chapter, status, started_at) \
             VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (user_id, story_id) DO UPDATE SET \
                current_chapter = EXCLUDED.current_chapter, \
                status = EXCLUDED.status, \
                started_at = COALESCE(user_story_progress.started_at, EXCLUDED.started_at) \
             WHERE user_story_progress.status <> 'completed' \
             RETURNING {PROGRESS_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, UserStoryProgress>(&query)
            .bind(user_id)
            .bind(story_id)
            .bind(chapter)
            .bind(StoryStatus::InProgress.as_str())
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(progress) => Ok(progress),
            None => Self::find_progress(pool, user_id, story_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }
}
