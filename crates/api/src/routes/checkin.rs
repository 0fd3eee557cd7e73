//! Route definitions for the `/checkin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::checkin;
use crate::state::AppState;

/// Routes mounted at `/checkin`.
///
/// ```text
/// GET  / -> get_checkins
/// POST / -> check_in
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(checkin::get_checkins).post(checkin::check_in))
}
