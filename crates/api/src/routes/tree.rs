//! Route definitions for the `/tree` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tree;
use crate::state::AppState;

/// Routes mounted at `/tree`.
///
/// ```text
/// POST /water     -> water
/// GET  /current   -> current
/// GET  /inventory -> inventory
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/water", post(tree::water))
        .route("/current", get(tree::current))
        .route("/inventory", get(tree::inventory))
}
