//! Route definitions for the `/escape` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::escape;
use crate::state::AppState;

/// Routes mounted at `/escape`.
///
/// ```text
/// POST /complete               -> complete_story
/// GET  /complete?storyId=      -> get_completion
/// POST /award-coupon           -> award_coupon
/// GET  /stories/{id}/progress  -> get_progress
/// PUT  /stories/{id}/progress  -> advance_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/complete",
            post(escape::complete_story).get(escape::get_completion),
        )
        .route("/award-coupon", post(escape::award_coupon))
        .route(
            "/stories/{id}/progress",
            get(escape::get_progress).put(escape::advance_progress),
        )
}
