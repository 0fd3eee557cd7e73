pub mod auth;
pub mod checkin;
pub mod escape;
pub mod garden;
pub mod health;
pub mod me;
pub mod tree;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth
///     POST /register                       create account, issue token
///     POST /login                          issue token
///
/// /checkin
///     GET  /                               history, streak, cycle stamps
///     POST /                               record today's check-in
///
/// /tree
///     POST /water                          water the active tree
///     GET  /current                        active tree
///     GET  /inventory                      all trees
///
/// /escape
///     POST /complete                       mark story completed
///     GET  /complete?storyId=              completion status
///     POST /award-coupon                   one-time place-clear coupon
///     GET  /stories/{id}/progress          story progress
///     PUT  /stories/{id}/progress          advance story progress
///
/// /garden
///     GET  /                               garden with placements
///     POST /place                          place a completed tree
///
/// /me
///     GET  /wallet                         coupon and water balances
///     GET  /rewards                        reward ledger (paginated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/checkin", checkin::router())
        .nest("/tree", tree::router())
        .nest("/escape", escape::router())
        .nest("/garden", garden::router())
        .nest("/me", me::router())
}
