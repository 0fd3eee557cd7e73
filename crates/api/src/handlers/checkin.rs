//! Handlers for the daily check-in ledger.
//!
//! The streak and cycle state are recomputed from the most recent
//! [`STREAK_WINDOW`] records on every request; nothing derived is stored.

use axum::extract::State;
use axum::Json;
use escapade_core::checkin::{CheckinDay, CycleSummary, CYCLE_REWARD_COUPONS, STREAK_WINDOW};
use escapade_core::types::DbId;
use escapade_db::models::checkin::CheckinRecord;
use escapade_db::repositories::CheckinRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Success;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body of `GET /checkin`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinState {
    /// Recent records, newest first.
    pub checkins: Vec<CheckinRecord>,
    #[serde(flatten)]
    pub summary: CycleSummary,
}

/// Body of `POST /checkin`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResult {
    pub already_checked: bool,
    pub awarded: bool,
    /// Coupons granted by this call.
    pub reward_amount: i32,
    #[serde(flatten)]
    pub summary: CycleSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/checkin
pub async fn get_checkins(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<CheckinState>>> {
    let today = state.today();
    let (checkins, history) = load_history(&state, auth.user_id).await?;
    let summary = CycleSummary::compute(&history, today);

    Ok(Json(Success::new(CheckinState { checkins, summary })))
}

/// POST /api/v1/checkin
///
/// Records today's check-in. A second call on the same day is a no-op that
/// reports `alreadyChecked`. The seventh consecutive day grants the cycle
/// bundle exactly once.
pub async fn check_in(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<CheckinResult>>> {
    let now = state.clock.now();
    let today = state.calendar.day_of(now);

    let inserted = CheckinRepo::insert_for_day(&state.pool, auth.user_id, now, today).await?;
    let (_, mut history) = load_history(&state, auth.user_id).await?;
    let mut summary = CycleSummary::compute(&history, today);

    let Some(record) = inserted else {
        tracing::debug!(user_id = auth.user_id, %today, "Already checked in today");
        return Ok(Json(Success::new(CheckinResult {
            already_checked: true,
            awarded: false,
            reward_amount: 0,
            summary,
        })));
    };

    tracing::info!(
        user_id = auth.user_id,
        record_id = record.id,
        streak = summary.streak,
        "Check-in recorded",
    );

    let mut awarded = false;
    if summary.completes_cycle(today) {
        awarded = CheckinRepo::grant_cycle_reward(&state.pool, auth.user_id, record.id)
            .await?
            .is_some();
        if awarded {
            for day in history.iter_mut().filter(|c| c.day == today) {
                day.rewarded = true;
            }
            summary = CycleSummary::compute(&history, today);
        }
    }

    Ok(Json(Success::new(CheckinResult {
        already_checked: false,
        awarded,
        reward_amount: if awarded { CYCLE_REWARD_COUPONS } else { 0 },
        summary,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_history(
    state: &AppState,
    user_id: DbId,
) -> AppResult<(Vec<CheckinRecord>, Vec<CheckinDay>)> {
    let records = CheckinRepo::list_recent(&state.pool, user_id, STREAK_WINDOW).await?;
    let history = records.iter().map(CheckinDay::from).collect();
    Ok((records, history))
}
