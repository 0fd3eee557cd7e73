//! Repository for the `users` table.

use escapade_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, User, Wallet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, is_active, \
                        coupon_count, water_stock, total_water_given, created_at, updated_at";

/// Counter columns returned by wallet queries.
const WALLET_COLUMNS: &str = "coupon_count, water_stock, total_water_given";

/// Provides account lookups and the reward counter updates.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Read the reward counters for a user.
    pub async fn wallet(pool: &PgPool, id: DbId) -> Result<Option<Wallet>, sqlx::Error> {
        let query = format!("SELECT {WALLET_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, Wallet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read the reward counters inside an open transaction.
    pub async fn wallet_in(conn: &mut PgConnection, id: DbId) -> Result<Wallet, sqlx::Error> {
        let query = format!("SELECT {WALLET_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, Wallet>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Add reward deltas to the counters and return the new balances.
    ///
    /// Water deltas increase both `water_stock` and `total_water_given`.
    pub async fn credit_in(
        conn: &mut PgConnection,
        id: DbId,
        coupons: i32,
        water: i32,
    ) -> Result<Wallet, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                coupon_count = coupon_count + $2,
                water_stock = water_stock + $3,
                total_water_given = total_water_given + $3
             WHERE id = $1
             RETURNING {WALLET_COLUMNS}"
        );
        sqlx::query_as::<_, Wallet>(&query)
            .bind(id)
            .bind(coupons)
            .bind(water)
            .fetch_one(conn)
            .await
    }
}
