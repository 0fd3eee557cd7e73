//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a bearer token or the
//!   session cookie.

pub mod auth;
