//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use escapade_core::error::CoreError;
use escapade_core::roles::ROLE_ADMIN;
use escapade_core::types::DbId;
use escapade_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated user resolved from the request.
///
/// The token is read from `Authorization: Bearer <token>` first, then from
/// the [`ACCESS_TOKEN_COOKIE`] cookie. Every failure is a 401 with the same
/// message; a token whose subject is not a positive id is `BAD_USER`, and a
/// deactivated account is 403.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"user"` or `"admin"`).
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(AppError::unauthorized)?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::unauthorized()
        })?;

        if claims.sub <= 0 {
            return Err(AppError::Core(CoreError::BadUser(claims.sub)));
        }

        // Deactivation takes effect before the token expires.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(AppError::unauthorized)?;
        if !user.is_active {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
