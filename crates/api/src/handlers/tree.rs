//! Handlers for tree growth: watering, the current tree and the inventory.

use axum::extract::State;
use axum::Json;
use escapade_core::error::CoreError;
use escapade_core::tree_growth::{resolve_water_grant, WaterSource, REQUIRED_WATER};
use escapade_db::models::tree::Tree;
use escapade_db::repositories::{GardenRepo, TreeRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::AppJson;
use crate::response::Success;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /tree/water`.
#[derive(Debug, Default, Deserialize)]
pub struct WaterRequest {
    pub source: Option<String>,
    /// Honoured only for `admin` and `bonus` grants.
    pub amount: Option<i32>,
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterResponse {
    pub source: WaterSource,
    pub amount: i32,
    pub required: i32,
    /// Clamped to `required`.
    pub water_count: i32,
    pub completed: bool,
    /// The tree that received the water.
    pub tree: Tree,
    /// Seedling planted when `tree` completed.
    pub next_tree: Option<Tree>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTreeResponse {
    pub tree: Option<Tree>,
    pub required: i32,
    pub water_count: i32,
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub trees: Vec<Tree>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tree/water
///
/// Adds water to the caller's active tree, planting one first if needed.
/// Watering is additive: repeated requests each count.
pub async fn water(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<WaterRequest>,
) -> AppResult<Json<Success<WaterResponse>>> {
    let grant = resolve_water_grant(input.source.as_deref(), input.amount)?;
    if grant.source == WaterSource::Admin && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin role required for admin water".into(),
        )));
    }

    if let Err(e) = GardenRepo::seed_starter(&state.pool, auth.user_id).await {
        tracing::warn!(user_id = auth.user_id, error = %e, "Starter garden seeding failed");
    }

    let outcome = TreeRepo::apply_water(&state.pool, auth.user_id, &grant, input.meta).await?;

    tracing::info!(
        user_id = auth.user_id,
        tree_id = outcome.tree.id,
        source = grant.source.as_str(),
        amount = grant.amount,
        water_count = outcome.tree.water_count,
        "Tree watered",
    );

    let message = if outcome.completed {
        "Tree fully grown. Your garden is open.".to_string()
    } else {
        format!(
            "Watered +{} ({}/{REQUIRED_WATER})",
            grant.amount,
            outcome.tree.display_water_count()
        )
    };

    Ok(Json(Success::new(WaterResponse {
        source: grant.source,
        amount: grant.amount,
        required: REQUIRED_WATER,
        water_count: outcome.tree.display_water_count(),
        completed: outcome.completed,
        tree: outcome.tree,
        next_tree: outcome.next_tree,
        message,
    })))
}

/// GET /api/v1/tree/current
pub async fn current(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<CurrentTreeResponse>>> {
    let tree = TreeRepo::find_current(&state.pool, auth.user_id).await?;
    let water_count = tree.as_ref().map_or(0, Tree::display_water_count);

    Ok(Json(Success::new(CurrentTreeResponse {
        tree,
        required: REQUIRED_WATER,
        water_count,
    })))
}

/// GET /api/v1/tree/inventory
///
/// All of the caller's trees, newest first.
pub async fn inventory(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Success<InventoryResponse>>> {
    let trees = TreeRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(Success::new(InventoryResponse { trees })))
}
