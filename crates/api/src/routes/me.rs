//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /wallet  -> wallet
/// GET /rewards -> rewards
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wallet", get(me::wallet))
        .route("/rewards", get(me::rewards))
}
