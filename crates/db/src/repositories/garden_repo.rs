//! Repository for the `gardens` and `garden_trees` tables.

use escapade_core::garden::{Transform, STARTER_LAYOUT};
use escapade_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::garden::{Garden, GardenTree, GardenView};

const COLUMNS: &str = "id, user_id, is_unlocked, opened_at, created_at, updated_at";

const PLACEMENT_COLUMNS: &str =
    "id, garden_id, tree_id, pos_x, pos_y, pos_z, rot_x, rot_y, rot_z, scale, created_at";

pub struct GardenRepo;

impl GardenRepo {
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Garden>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gardens WHERE user_id = $1");
        sqlx::query_as::<_, Garden>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Placements in a garden, oldest first.
    pub async fn list_trees(
        pool: &PgPool,
        garden_id: DbId,
    ) -> Result<Vec<GardenTree>, sqlx::Error> {
        let query = format!(
            "SELECT {PLACEMENT_COLUMNS} FROM garden_trees \
             WHERE garden_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, GardenTree>(&query)
            .bind(garden_id)
            .fetch_all(pool)
            .await
    }

    /// The user's garden with its placements, or `None` if it was never created.
    pub async fn view(pool: &PgPool, user_id: DbId) -> Result<Option<GardenView>, sqlx::Error> {
        let Some(garden) = Self::find_for_user(pool, user_id).await? else {
            return Ok(None);
        };
        let trees = Self::list_trees(pool, garden.id).await?;
        Ok(Some(GardenView { garden, trees }))
    }

    /// Create a locked garden with the starter layout.
    ///
    /// Returns `false` without touching anything when the user already has a
    /// garden.
    pub async fn seed_starter(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let created: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO gardens (user_id, is_unlocked) \
             VALUES ($1, false) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING id",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((garden_id,)) = created else {
            tx.rollback().await?;
            return Ok(false);
        };

        for transform in &STARTER_LAYOUT {
            Self::insert_placement_in(&mut tx, garden_id, None, transform).await?;
        }

        tx.commit().await?;
        tracing::debug!(user_id, garden_id, "Starter garden seeded");
        Ok(true)
    }

    /// Mark the user's garden unlocked, creating it if absent.
    ///
    /// An existing `opened_at` is kept.
    pub async fn unlock_in(conn: &mut PgConnection, user_id: DbId) -> Result<Garden, sqlx::Error> {
        let query = format!(
            "INSERT INTO gardens (user_id, is_unlocked, opened_at) \
             VALUES ($1, true, NOW()) \
             ON CONFLICT (user_id) DO UPDATE SET \
                is_unlocked = true, \
                opened_at = COALESCE(gardens.opened_at, NOW()) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Garden>(&query)
            .bind(user_id)
            .fetch_one(conn)
            .await
    }

    async fn insert_placement_in(
        conn: &mut PgConnection,
        garden_id: DbId,
        tree_id: Option<DbId>,
        t: &Transform,
    ) -> Result<GardenTree, sqlx::Error> {
        let query = format!(
            "INSERT INTO garden_trees \
                (garden_id, tree_id, pos_x, pos_y, pos_z, rot_x, rot_y, rot_z, scale) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PLACEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, GardenTree>(&query)
            .bind(garden_id)
            .bind(tree_id)
            .bind(t.pos_x)
            .bind(t.pos_y)
            .bind(t.pos_z)
            .bind(t.rot_x)
            .bind(t.rot_y)
            .bind(t.rot_z)
            .bind(t.scale)
            .fetch_one(conn)
            .await
    }

    /// Place a tree in the user's garden, unlocking the garden if needed.
    ///
    /// Ownership and completion must be checked by the caller.
    pub async fn place(
        pool: &PgPool,
        user_id: DbId,
        tree_id: DbId,
        transform: &Transform,
    ) -> Result<GardenTree, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let garden = Self::unlock_in(&mut tx, user_id).await?;
        let placed = Self::insert_placement_in(&mut tx, garden.id, Some(tree_id), transform).await?;
        tx.commit().await?;

        tracing::info!(user_id, tree_id, placement_id = placed.id, "Tree placed in garden");
        Ok(placed)
    }
}
