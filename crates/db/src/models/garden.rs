//! Garden and placement models.

use escapade_core::garden::Transform;
use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `gardens` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Garden {
    pub id: DbId,
    pub user_id: DbId,
    pub is_unlocked: bool,
    pub opened_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `garden_trees` table.
///
/// Starter-layout placements have no `tree_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenTree {
    pub id: DbId,
    pub garden_id: DbId,
    pub tree_id: Option<DbId>,
    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
    pub scale: f64,
    pub created_at: Timestamp,
}

impl GardenTree {
    pub fn transform(&self) -> Transform {
        Transform {
            pos_x: self.pos_x,
            pos_y: self.pos_y,
            pos_z: self.pos_z,
            rot_x: self.rot_x,
            rot_y: self.rot_y,
            rot_z: self.rot_z,
            scale: self.scale,
        }
    }
}

/// A garden together with everything placed in it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenView {
    #[serde(flatten)]
    pub garden: Garden,
    pub trees: Vec<GardenTree>,
}
