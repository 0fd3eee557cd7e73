//! HTTP-level integration tests for escape completion, story progress and
//! the place-clear coupon.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, get_auth, post_json_auth, put_json_auth};
use escapade_db::repositories::CatalogRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Coupon
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn coupon_awarded_once_per_place(pool: PgPool) {
    let (_user, token) = create_user(&pool, "clearer", "user").await;
    let place = CatalogRepo::create_place(&pool, "Abandoned Chapel").await.unwrap();
    let body = json!({ "placeId": place.id });

    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/escape/award-coupon", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["awarded"], true);
    assert_eq!(first["ticketsRemaining"], 1);

    let app = build_test_app(pool.clone());
    let second =
        body_json(post_json_auth(app, "/api/v1/escape/award-coupon", body, &token).await).await;
    assert_eq!(second["awarded"], false);
    assert_eq!(second["ticketsRemaining"], 1);

    let app = build_test_app(pool);
    let rewards = body_json(get_auth(app, "/api/v1/me/rewards", &token).await).await;
    let rewards = rewards["rewards"].as_array().unwrap().clone();
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0]["rewardType"], "escape_place_clear");
    assert_eq!(rewards[0]["placeId"], place.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn coupon_validates_place(pool: PgPool) {
    let (_user, token) = create_user(&pool, "lost", "user").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/escape/award-coupon", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "placeId is required");

    let app = build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/escape/award-coupon", json!({ "placeId": -1 }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/escape/award-coupon",
        json!({ "placeId": 987_654 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_is_idempotent(pool: PgPool) {
    let (_user, token) = create_user(&pool, "finisher", "user").await;
    let story = CatalogRepo::create_story(&pool, "Lighthouse", 3).await.unwrap();
    let body = json!({ "storyId": story.id });

    let app = build_test_app(pool.clone());
    let first =
        body_json(post_json_auth(app, "/api/v1/escape/complete", body.clone(), &token).await).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["item"]["storyId"], story.id);
    assert!(first.get("already").is_none());

    let app = build_test_app(pool.clone());
    let second =
        body_json(post_json_auth(app, "/api/v1/escape/complete", body, &token).await).await;
    assert_eq!(second["success"], true);
    assert_eq!(second["already"], true);

    let uri = format!("/api/v1/escape/complete?storyId={}", story.id);
    let app = build_test_app(pool.clone());
    let status = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(status["completed"], true);
    assert_eq!(status["item"]["id"], first["item"]["id"]);

    let uri = format!("/api/v1/escape/stories/{}/progress", story.id);
    let app = build_test_app(pool);
    let progress = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(progress["progress"]["status"], "completed");
    assert_eq!(progress["progress"]["currentChapter"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_status_for_untouched_story(pool: PgPool) {
    let (_user, token) = create_user(&pool, "reader", "user").await;
    let story = CatalogRepo::create_story(&pool, "Cellar", 2).await.unwrap();

    let uri = format!("/api/v1/escape/complete?storyId={}", story.id);
    let app = build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["completed"], false);
    assert!(json["item"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_rejects_unknown_story(pool: PgPool) {
    let (_user, token) = create_user(&pool, "wanderer", "user").await;

    let app = build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/escape/complete", json!({ "storyId": 424_242 }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/escape/complete", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_advances_within_chapter_bounds(pool: PgPool) {
    let (_user, token) = create_user(&pool, "chapterer", "user").await;
    let story = CatalogRepo::create_story(&pool, "Clockwork", 4).await.unwrap();
    let uri = format!("/api/v1/escape/stories/{}/progress", story.id);

    let app = build_test_app(pool.clone());
    let initial = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(initial["progress"]["status"], "not_started");

    let app = build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "currentChapter": 3 }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["progress"]["status"], "in_progress");
    assert_eq!(json["progress"]["currentChapter"], 3);

    let app = build_test_app(pool);
    let response = put_json_auth(app, &uri, json!({ "currentChapter": 5 }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
