//! Repository for the `trees` and `water_logs` tables.
//!
//! A user has at most one tree that is not `completed`
//! (`uq_trees_user_active`). Watering locks that row for the duration of the
//! transaction so concurrent grants serialize.

use escapade_core::tree_growth::{plan_watering, TreeStatus, WaterGrant};
use escapade_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::tree::{Tree, WaterOutcome};
use crate::repositories::GardenRepo;

const COLUMNS: &str = "id, user_id, status, water_count, completed_at, created_at, updated_at";

pub struct TreeRepo;

impl TreeRepo {
    /// The user's tree in progress, if any.
    pub async fn find_current(pool: &PgPool, user_id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trees \
             WHERE user_id = $1 AND status <> 'completed' \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trees WHERE id = $1");
        sqlx::query_as::<_, Tree>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All of a user's trees, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Tree>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trees \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a fresh seedling unless the user already has an active tree.
    async fn insert_seedling_in(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<Tree>, sqlx::Error> {
        let query = format!(
            "INSERT INTO trees (user_id, status, water_count) \
             VALUES ($1, $2, 0) \
             ON CONFLICT (user_id) WHERE status <> 'completed' DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tree>(&query)
            .bind(user_id)
            .bind(TreeStatus::Seedling.as_str())
            .fetch_optional(conn)
            .await
    }

    /// Lock the active tree, creating a seedling first when there is none.
    async fn lock_current_in(conn: &mut PgConnection, user_id: DbId) -> Result<Tree, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trees \
             WHERE user_id = $1 AND status <> 'completed' \
             FOR UPDATE"
        );

        if let Some(tree) = sqlx::query_as::<_, Tree>(&query)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
        {
            return Ok(tree);
        }

        if let Some(tree) = Self::insert_seedling_in(&mut *conn, user_id).await? {
            tracing::debug!(user_id, tree_id = tree.id, "Seedling created");
            return Ok(tree);
        }

        // A concurrent request created the seedling between the two statements.
        sqlx::query_as::<_, Tree>(&query)
            .bind(user_id)
            .fetch_one(conn)
            .await
    }

    /// Apply one water grant to the user's active tree.
    ///
    /// Inside a single transaction: lock (or create) the active tree, append
    /// the water log, advance the counter and status. When the grant
    /// completes the tree, the user's garden is unlocked and a new seedling
    /// is planted. Overflow is not carried into the new seedling.
    pub async fn apply_water(
        pool: &PgPool,
        user_id: DbId,
        grant: &WaterGrant,
        meta: Option<serde_json::Value>,
    ) -> Result<WaterOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current = Self::lock_current_in(&mut tx, user_id).await?;
        let step = plan_watering(current.water_count, grant.amount);

        sqlx::query(
            "INSERT INTO water_logs (user_id, tree_id, amount, source, meta) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(current.id)
        .bind(grant.amount)
        .bind(grant.source.as_str())
        .bind(&meta)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE trees SET \
                water_count = $2, \
                status = $3, \
                completed_at = CASE WHEN $4 THEN NOW() ELSE completed_at END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let tree = sqlx::query_as::<_, Tree>(&query)
            .bind(current.id)
            .bind(step.next_count)
            .bind(step.status.as_str())
            .bind(step.completed)
            .fetch_one(&mut *tx)
            .await?;

        let next_tree = if step.completed {
            GardenRepo::unlock_in(&mut tx, user_id).await?;
            Self::insert_seedling_in(&mut tx, user_id).await?
        } else {
            None
        };

        tx.commit().await?;

        if step.completed {
            tracing::info!(
                user_id,
                tree_id = tree.id,
                next_tree_id = next_tree.as_ref().map(|t| t.id),
                "Tree completed, garden unlocked",
            );
        }

        Ok(WaterOutcome {
            tree,
            next_tree,
            completed: step.completed,
        })
    }
}
