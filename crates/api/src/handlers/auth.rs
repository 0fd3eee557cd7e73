//! Handlers for the `/auth` resource (register, login).
//!
//! Both return an access token in the body and set it as the
//! `access_token` cookie for browser clients.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use escapade_core::error::CoreError;
use escapade_core::roles::ROLE_USER;
use escapade_db::models::user::{CreateUser, User, UserResponse};
use escapade_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::query::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a `user` account. A taken username is a 409 via `uq_users_username`.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username is required".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let email = input
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let (jar, body) = issue_token(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, Json(body)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, "User logged in");

    let (jar, body) = issue_token(&state, jar, &user)?;
    Ok((jar, Json(body)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue_token(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> AppResult<(CookieJar, AuthResponse)> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, access_token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();

    let body = AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_secs(),
        user: UserResponse::from(user),
    };
    Ok((jar.add(cookie), body))
}
