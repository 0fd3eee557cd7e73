//! Handlers for escape story completion, story progress and the
//! place-clear coupon.

use axum::extract::State;
use axum::Json;
use escapade_core::error::{require_positive_id, CoreError};
use escapade_core::escape::{validate_chapter, StoryStatus};
use escapade_core::types::{DbId, Timestamp};
use escapade_db::models::catalog::EscapeStory;
use escapade_db::models::escape::{CompletedEscape, CompletionOutcome, UserStoryProgress};
use escapade_db::models::reward::PlaceClearOutcome;
use escapade_db::repositories::{CatalogRepo, EscapeRepo, RewardRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{AppJson, AppPath, AppQuery, StoryQuery};
use crate::response::Success;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteStoryRequest {
    pub story_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCouponRequest {
    pub place_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceProgressRequest {
    pub current_chapter: Option<i32>,
}

/// Body of `POST /escape/complete`: either the new item or `already: true`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompleteStoryResponse {
    Created { item: CompletedEscape },
    Already { already: bool },
}

#[derive(Debug, Serialize)]
pub struct CompletionStatus {
    pub completed: bool,
    pub item: Option<CompletedEscape>,
}

/// A user's position in a story. Stories never opened report `not_started`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryProgress {
    pub story_id: DbId,
    pub current_chapter: i32,
    pub status: String,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl StoryProgress {
    fn not_started(story_id: DbId) -> Self {
        Self {
            story_id,
            current_chapter: 1,
            status: StoryStatus::NotStarted.as_str().to_string(),
            started_at: None,
            completed_at: None,
        }
    }
}

impl From<UserStoryProgress> for StoryProgress {
    fn from(p: UserStoryProgress) -> Self {
        Self {
            story_id: p.story_id,
            current_chapter: p.current_chapter,
            status: p.status,
            started_at: p.started_at,
            completed_at: p.completed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: StoryProgress,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// POST /api/v1/escape/complete
///
/// Idempotent. A repeat call re-syncs the progress row and returns
/// `already: true`.
pub async fn complete_story(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CompleteStoryRequest>,
) -> AppResult<Json<Success<CompleteStoryResponse>>> {
    let story_id = require_positive_id("storyId", input.story_id)?;
    ensure_story(&state, story_id).await?;

    let body = match EscapeRepo::complete_story(&state.pool, auth.user_id, story_id).await? {
        CompletionOutcome::Created(item) => CompleteStoryResponse::Created { item },
        CompletionOutcome::AlreadyCompleted => {
            tracing::debug!(user_id = auth.user_id, story_id, "Story already completed");
            CompleteStoryResponse::Already { already: true }
        }
    };

    Ok(Json(Success::new(body)))
}

/// GET /api/v1/escape/complete?storyId=
pub async fn get_completion(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StoryQuery>,
) -> AppResult<Json<CompletionStatus>> {
    let story_id = require_positive_id("storyId", params.story_id)?;
    ensure_story(&state, story_id).await?;

    let item = EscapeRepo::find_completed(&state.pool, auth.user_id, story_id).await?;
    Ok(Json(CompletionStatus {
        completed: item.is_some(),
        item,
    }))
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// GET /api/v1/escape/stories/{id}/progress
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(story_id): AppPath<DbId>,
) -> AppResult<Json<Success<ProgressResponse>>> {
    ensure_story(&state, story_id).await?;

    let progress = EscapeRepo::find_progress(&state.pool, auth.user_id, story_id)
        .await?
        .map_or_else(|| StoryProgress::not_started(story_id), StoryProgress::from);

    Ok(Json(Success::new(ProgressResponse { progress })))
}

/// PUT /api/v1/escape/stories/{id}/progress
///
/// Moves the chapter pointer of a story that is not completed. A completed
/// story is returned unchanged.
pub async fn advance_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(story_id): AppPath<DbId>,
    AppJson(input): AppJson<AdvanceProgressRequest>,
) -> AppResult<Json<Success<ProgressResponse>>> {
    let story = ensure_story(&state, story_id).await?;
    let chapter = input
        .current_chapter
        .ok_or_else(|| CoreError::Validation("currentChapter is required".into()))?;
    validate_chapter(chapter, story.chapter_count)?;

    let progress =
        EscapeRepo::advance_progress(&state.pool, auth.user_id, story_id, chapter).await?;

    tracing::info!(
        user_id = auth.user_id,
        story_id,
        chapter = progress.current_chapter,
        status = %progress.status,
        "Story progress updated",
    );

    Ok(Json(Success::new(ProgressResponse {
        progress: progress.into(),
    })))
}

// ---------------------------------------------------------------------------
// Place-clear coupon
// ---------------------------------------------------------------------------

/// POST /api/v1/escape/award-coupon
///
/// Grants one coupon the first time the caller clears a place. Later calls
/// report `awarded: false` with the current balance.
pub async fn award_coupon(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<AwardCouponRequest>,
) -> AppResult<Json<PlaceClearOutcome>> {
    let place_id = require_positive_id("placeId", input.place_id)?;
    CatalogRepo::find_place(&state.pool, place_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id: place_id,
        }))?;

    let outcome = RewardRepo::award_place_clear(&state.pool, auth.user_id, place_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        place_id,
        awarded = outcome.awarded,
        tickets_remaining = outcome.tickets_remaining,
        "Place-clear coupon requested",
    );

    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_story(state: &AppState, story_id: DbId) -> AppResult<EscapeStory> {
    CatalogRepo::find_story(&state.pool, story_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "EscapeStory",
            id: story_id,
        }))
}
