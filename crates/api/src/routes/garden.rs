//! Route definitions for the `/garden` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::garden;
use crate::state::AppState;

/// Routes mounted at `/garden`.
///
/// ```text
/// GET  /      -> get_garden
/// POST /place -> place_tree
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(garden::get_garden))
        .route("/place", post(garden::place_tree))
}
