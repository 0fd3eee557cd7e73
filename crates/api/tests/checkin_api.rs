//! HTTP-level integration tests for the daily check-in ledger.
//!
//! Time is frozen per request with a fixed clock so a test can walk a user
//! through consecutive days.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use common::{body_json, build_test_app_at, create_user, get, get_auth, get_cookie, post_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Noon in UTC+9 on 2026-03-`day`.
fn noon_kst(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 3, 0, 0).unwrap()
}

async fn check_in_on(pool: &PgPool, at: DateTime<Utc>, token: &str) -> serde_json::Value {
    let app = build_test_app_at(pool.clone(), at);
    let response = post_auth(app, "/api/v1/checkin", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_checkin_starts_streak(pool: PgPool) {
    let (_user, token) = create_user(&pool, "first_checkin", "user").await;

    let json = check_in_on(&pool, noon_kst(1), &token).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["alreadyChecked"], false);
    assert_eq!(json["awarded"], false);
    assert_eq!(json["rewardAmount"], 0);
    assert_eq!(json["streak"], 1);
    assert_eq!(json["weekCount"], 1);
    assert_eq!(
        json["weekStamps"],
        serde_json::json!([true, false, false, false, false, false, false])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_checkin_same_day_is_noop(pool: PgPool) {
    let (_user, token) = create_user(&pool, "twice_a_day", "user").await;

    check_in_on(&pool, noon_kst(1), &token).await;
    let later = Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap(); // 23:00 KST
    let json = check_in_on(&pool, later, &token).await;
    assert_eq!(json["alreadyChecked"], true);
    assert_eq!(json["awarded"], false);
    assert_eq!(json["streak"], 1);

    let app = build_test_app_at(pool.clone(), later);
    let json = body_json(get_auth(app, "/api/v1/checkin", &token).await).await;
    assert_eq!(json["checkins"].as_array().unwrap().len(), 1);
    assert_eq!(json["todayChecked"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn day_boundary_follows_reward_timezone(pool: PgPool) {
    let (_user, token) = create_user(&pool, "kst_boundary", "user").await;

    // 14:30 UTC on the 1st is still the 1st in KST; 15:30 UTC is the 2nd.
    check_in_on(&pool, Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 0).unwrap(), &token).await;
    let json =
        check_in_on(&pool, Utc.with_ymd_and_hms(2026, 3, 1, 15, 30, 0).unwrap(), &token).await;
    assert_eq!(json["alreadyChecked"], false);
    assert_eq!(json["streak"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seventh_day_awards_cycle_once(pool: PgPool) {
    let (user, token) = create_user(&pool, "seven_days", "user").await;

    for day in 1..=6 {
        let json = check_in_on(&pool, noon_kst(day), &token).await;
        assert_eq!(json["awarded"], false, "day {day} must not award");
        assert_eq!(json["streak"], day);
    }

    let json = check_in_on(&pool, noon_kst(7), &token).await;
    assert_eq!(json["awarded"], true);
    assert_eq!(json["rewardAmount"], 3);
    assert_eq!(json["streak"], 7);
    assert_eq!(json["weekCount"], 7);
    assert_eq!(json["weekStamps"], serde_json::Value::from(vec![true; 7]));

    // A repeat on day 7 reports the completed cycle without re-awarding.
    let json = check_in_on(&pool, noon_kst(7), &token).await;
    assert_eq!(json["alreadyChecked"], true);
    assert_eq!(json["awarded"], false);
    assert_eq!(json["streak"], 7);

    // Day 8 starts a fresh cycle.
    let json = check_in_on(&pool, noon_kst(8), &token).await;
    assert_eq!(json["awarded"], false);
    assert_eq!(json["streak"], 1);
    assert_eq!(
        json["weekStamps"],
        serde_json::json!([true, false, false, false, false, false, false])
    );

    let app = build_test_app_at(pool.clone(), noon_kst(8));
    let wallet = body_json(get_auth(app, "/api/v1/me/wallet", &token).await).await;
    assert_eq!(wallet["couponCount"], 3);
    assert_eq!(wallet["waterStock"], 2);
    assert_eq!(wallet["totalWaterGiven"], 2);

    let rewards = escapade_db::repositories::RewardRepo::list_for_user(&pool, user.id, None, None)
        .await
        .unwrap();
    assert_eq!(rewards.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missed_day_resets_streak(pool: PgPool) {
    let (_user, token) = create_user(&pool, "gap_day", "user").await;

    check_in_on(&pool, noon_kst(1), &token).await;
    check_in_on(&pool, noon_kst(2), &token).await;
    let json = check_in_on(&pool, noon_kst(4), &token).await;
    assert_eq!(json["streak"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkin_requires_identity(pool: PgPool) {
    let app = build_test_app_at(pool, noon_kst(1));
    let response = get(app, "/api/v1/checkin").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "인증이 필요합니다");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cookie_is_accepted(pool: PgPool) {
    let (_user, token) = create_user(&pool, "cookie_user", "user").await;
    let app = build_test_app_at(pool, noon_kst(1));

    let response = get_cookie(app, "/api/v1/checkin", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["streak"], 0);
    assert_eq!(json["todayChecked"], false);
}
