//! Tree models.

use escapade_core::tree_growth::{display_water_count, TreeStatus};
use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `trees` table.
///
/// `water_count` is the stored counter and may exceed the completion
/// threshold by the overflow of the final grant.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub water_count: i32,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tree {
    pub fn is_completed(&self) -> bool {
        self.status == TreeStatus::Completed.as_str()
    }

    /// Water count clamped for display.
    pub fn display_water_count(&self) -> i32 {
        display_water_count(self.water_count)
    }
}

/// What a single watering did.
#[derive(Debug, Clone)]
pub struct WaterOutcome {
    /// The tree that received the water, after the update.
    pub tree: Tree,
    /// The seedling spawned when `tree` completed.
    pub next_tree: Option<Tree>,
    pub completed: bool,
}
