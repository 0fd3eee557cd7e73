//! Reward ledger rows and award outcomes.

use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `user_rewards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReward {
    pub id: DbId,
    pub user_id: DbId,
    pub reward_type: String,
    pub amount: i32,
    pub unit: String,
    pub place_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Result of a one-time place-clear award attempt.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceClearOutcome {
    pub awarded: bool,
    /// The user's coupon balance after the attempt.
    pub tickets_remaining: i32,
}
