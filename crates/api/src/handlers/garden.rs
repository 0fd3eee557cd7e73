//! Handlers for the garden: reading it and placing completed trees.

use axum::extract::State;
use axum::Json;
use escapade_core::error::{require_positive_id, CoreError};
use escapade_core::garden::{check_placeable, validate_transform, Transform};
use escapade_core::types::DbId;
use escapade_db::models::garden::{GardenTree, GardenView};
use escapade_db::repositories::{GardenRepo, TreeRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::AppJson;
use crate::response::Success;
use crate::state::AppState;

/// Request body for `POST /garden/place`.
///
/// Omitted position and rotation components default to `0`, scale to `1`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceTreeRequest {
    pub tree_id: Option<DbId>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub pos_z: Option<f64>,
    pub rot_x: Option<f64>,
    pub rot_y: Option<f64>,
    pub rot_z: Option<f64>,
    pub scale: Option<f64>,
}

impl PlaceTreeRequest {
    fn transform(&self) -> Transform {
        Transform {
            pos_x: self.pos_x.unwrap_or(0.0),
            pos_y: self.pos_y.unwrap_or(0.0),
            pos_z: self.pos_z.unwrap_or(0.0),
            rot_x: self.rot_x.unwrap_or(0.0),
            rot_y: self.rot_y.unwrap_or(0.0),
            rot_z: self.rot_z.unwrap_or(0.0),
            scale: self.scale.unwrap_or(1.0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GardenResponse {
    pub garden: Option<GardenView>,
}

#[derive(Debug, Serialize)]
pub struct PlaceTreeResponse {
    pub placed: GardenTree,
}

/// GET /api/v1/garden
pub async fn get_garden(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<GardenResponse>>> {
    let garden = GardenRepo::view(&state.pool, auth.user_id).await?;
    Ok(Json(Success::new(GardenResponse { garden })))
}

/// POST /api/v1/garden/place
///
/// Only the caller's own completed trees can be placed. Someone else's tree
/// is reported as not found.
pub async fn place_tree(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<PlaceTreeRequest>,
) -> AppResult<Json<Success<PlaceTreeResponse>>> {
    let tree_id = require_positive_id("treeId", input.tree_id)?;
    let transform = input.transform();
    validate_transform(&transform)?;

    let tree = TreeRepo::find_by_id(&state.pool, tree_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tree",
            id: tree_id,
        }))?;
    check_placeable(tree.id, tree.user_id, &tree.status, auth.user_id)?;

    let placed = GardenRepo::place(&state.pool, auth.user_id, tree.id, &transform).await?;
    Ok(Json(Success::new(PlaceTreeResponse { placed })))
}
