//! Repository for the `checkin_records` table and the cycle reward grant.

use chrono::NaiveDate;
use escapade_core::checkin::cycle_reward_bundle;
use escapade_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::checkin::CheckinRecord;
use crate::models::user::Wallet;
use crate::repositories::{RewardRepo, UserRepo};

const COLUMNS: &str = "id, user_id, checked_at, checkin_day, rewarded";

pub struct CheckinRepo;

impl CheckinRepo {
    /// Record a check-in for `day`.
    ///
    /// Returns `None` when the user already checked in that day; the unique
    /// constraint `uq_checkin_records_user_day` makes concurrent duplicates
    /// collapse into one row.
    pub async fn insert_for_day(
        pool: &PgPool,
        user_id: DbId,
        checked_at: Timestamp,
        day: NaiveDate,
    ) -> Result<Option<CheckinRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO checkin_records (user_id, checked_at, checkin_day) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, checkin_day) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CheckinRecord>(&query)
            .bind(user_id)
            .bind(checked_at)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// The most recent `limit` check-ins, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<CheckinRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM checkin_records \
             WHERE user_id = $1 \
             ORDER BY checkin_day DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, CheckinRecord>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Grant the completed-cycle bundle on `record_id`.
    ///
    /// Flips the record's `rewarded` flag, appends the bundle to the ledger
    /// and credits the user, all in one transaction. Returns `None` without
    /// writing anything when the record was already rewarded.
    pub async fn grant_cycle_reward(
        pool: &PgPool,
        user_id: DbId,
        record_id: DbId,
    ) -> Result<Option<Wallet>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE checkin_records SET rewarded = true \
             WHERE id = $1 AND user_id = $2 AND rewarded = false",
        )
        .bind(record_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let bundle = cycle_reward_bundle();
        for entry in &bundle {
            RewardRepo::insert_in(&mut tx, user_id, entry, None).await?;
        }
        let coupons: i32 = bundle.iter().map(|e| e.coupon_delta()).sum();
        let water: i32 = bundle.iter().map(|e| e.water_delta()).sum();
        let wallet = UserRepo::credit_in(&mut tx, user_id, coupons, water).await?;

        tx.commit().await?;

        tracing::info!(user_id, record_id, coupons, water, "Check-in cycle rewarded");
        Ok(Some(wallet))
    }
}
