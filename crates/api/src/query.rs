//! Shared request extractors and query parameter types.
//!
//! [`AppJson`], [`AppQuery`] and [`AppPath`] wrap the axum extractors so malformed input
//! is reported through [`AppError`] with the usual JSON error body.

use axum::extract::{FromRequest, FromRequestParts};
use escapade_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// `axum::Json` with rejections mapped to `400 BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with rejections mapped to `400 BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `axum::extract::Path` with rejections mapped to `400 BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?storyId=` selector.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryQuery {
    pub story_id: Option<DbId>,
}
