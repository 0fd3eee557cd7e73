//! Repository for the append-only `user_rewards` ledger.
//!
//! For place-scoped rewards the ledger row doubles as the uniqueness guard:
//! the partial unique index `uq_user_rewards_place_clear` makes a second
//! insert for the same (user, place, type) a no-op.

use escapade_core::escape::place_clear_reward;
use escapade_core::reward::RewardEntry;
use escapade_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::reward::{PlaceClearOutcome, UserReward};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, user_id, reward_type, amount, unit, place_id, created_at";

/// Default page size for reward history.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for reward history.
const MAX_LIMIT: i64 = 200;

pub struct RewardRepo;

impl RewardRepo {
    /// Append a ledger row. Returns `None` when a unique index rejected it.
    pub async fn insert_in(
        conn: &mut PgConnection,
        user_id: DbId,
        entry: &RewardEntry,
        place_id: Option<DbId>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO user_rewards (user_id, reward_type, amount, unit, place_id) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT DO NOTHING \
             RETURNING id",
        )
        .bind(user_id)
        .bind(entry.reward_type)
        .bind(entry.amount)
        .bind(entry.unit.as_str())
        .bind(place_id)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Grant the one-time coupon for clearing `place_id`.
    ///
    /// The ledger insert and the counter increment commit together; a repeat
    /// clear leaves both untouched and reports the current balance.
    pub async fn award_place_clear(
        pool: &PgPool,
        user_id: DbId,
        place_id: DbId,
    ) -> Result<PlaceClearOutcome, sqlx::Error> {
        let entry = place_clear_reward();
        let mut tx = pool.begin().await?;

        let inserted = Self::insert_in(&mut tx, user_id, &entry, Some(place_id)).await?;
        let outcome = match inserted {
            Some(_) => {
                let wallet = UserRepo::credit_in(
                    &mut tx,
                    user_id,
                    entry.coupon_delta(),
                    entry.water_delta(),
                )
                .await?;
                PlaceClearOutcome {
                    awarded: true,
                    tickets_remaining: wallet.coupon_count,
                }
            }
            None => {
                let wallet = UserRepo::wallet_in(&mut tx, user_id).await?;
                PlaceClearOutcome {
                    awarded: false,
                    tickets_remaining: wallet.coupon_count,
                }
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// List a user's ledger, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserReward>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM user_rewards \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UserReward>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
