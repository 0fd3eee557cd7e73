//! Handlers for the caller's reward balances and ledger.

use axum::extract::State;
use axum::Json;
use escapade_core::error::CoreError;
use escapade_db::models::reward::UserReward;
use escapade_db::models::user::Wallet;
use escapade_db::repositories::{RewardRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{AppQuery, PaginationParams};
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RewardHistoryResponse {
    pub rewards: Vec<UserReward>,
}

/// GET /api/v1/me/wallet
pub async fn wallet(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<Wallet>>> {
    let wallet = UserRepo::wallet(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(Success::new(wallet)))
}

/// GET /api/v1/me/rewards?limit=&offset=
///
/// Ledger rows, newest first.
pub async fn rewards(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Success<RewardHistoryResponse>>> {
    let rewards =
        RewardRepo::list_for_user(&state.pool, auth.user_id, params.limit, params.offset).await?;
    Ok(Json(Success::new(RewardHistoryResponse { rewards })))
}
