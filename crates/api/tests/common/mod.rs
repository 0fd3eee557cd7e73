#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use escapade_api::auth::jwt::{generate_access_token, JwtConfig};
use escapade_api::config::ServerConfig;
use escapade_api::router::build_app_router;
use escapade_api::state::AppState;
use escapade_core::clock::{Clock, FixedClock, RewardCalendar, SystemClock};
use escapade_db::models::user::{CreateUser, User};
use escapade_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Offset used by the tests: UTC+9.
pub const TEST_OFFSET_MINUTES: i32 = 540;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        reward_utc_offset_minutes: TEST_OFFSET_MINUTES,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

fn build_with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock,
        calendar: RewardCalendar::from_offset_minutes(TEST_OFFSET_MINUTES).unwrap(),
    };
    build_app_router(state, &config)
}

/// Build the full application router against the wall clock.
pub fn build_test_app(pool: PgPool) -> Router {
    build_with_clock(pool, Arc::new(SystemClock))
}

/// Build the application router with time frozen at `now`.
pub fn build_test_app_at(pool: PgPool, now: DateTime<Utc>) -> Router {
    build_with_clock(pool, Arc::new(FixedClock(now)))
}

/// Insert a user directly and mint an access token for it.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: None,
            password_hash: "unused".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with the token supplied as the session cookie instead of a header.
pub async fn get_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("cookie", format!("access_token={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}
