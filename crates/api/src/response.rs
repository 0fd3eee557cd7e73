//! Shared response envelope for API handlers.
//!
//! Successful responses carry `"success": true` next to the payload fields.
//! Use [`Success`] instead of ad-hoc `serde_json::json!` envelopes.

use serde::Serialize;

/// `{ "success": true, ...fields of T }` response envelope.
///
/// `T` must serialize as a map (a struct or `serde_json::Value::Object`).
///
/// ```ignore
/// Ok(Json(Success::new(WalletBody { coupon_count, .. })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
