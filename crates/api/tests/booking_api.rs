//! HTTP-level integration tests for the booking flow: the transactional
//! debit, admission rules, and rollback on rejection.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_class, get, get_auth, make_verified_host, member_with_credits,
    post_json_auth, signup_user,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Book a class via the API and return the raw response.
async fn book(pool: &PgPool, class_id: i64, token: &str) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/classes/{class_id}/bookings"),
        serde_json::json!({}),
        token,
    )
    .await
}

/// Seed a verified host with one upcoming class; returns the class id.
async fn seed_class(pool: &PgPool) -> i64 {
    let (_host_id, host_token) = make_verified_host(pool, "host@test.com", "Class Host").await;
    let class = create_class(pool, &host_token, "Sourdough for beginners", "Cooking").await;
    class["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

/// A successful booking debits the balance, appends a ledger entry, and
/// shows up under /me/bookings with the address included.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_debits_and_logs(pool: PgPool) {
    let class_id = seed_class(&pool).await;
    let token = member_with_credits(&pool, "guest@test.com", "The Guest").await;

    let response = book(&pool, class_id, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["booking"]["status"], "confirmed");
    assert_eq!(json["booking"]["class_id"].as_i64().unwrap(), class_id);
    // £20 bought 10 credits; the class costs 5.
    assert_eq!(json["credits"]["topped_up_balance"], 5);
    assert_eq!(json["credits"]["teaching_balance"], 0);
    assert_eq!(json["credits"]["total_balance"], 5);

    // The ledger gained a negative booking entry pointing at the class.
    let app = common::build_test_app(pool.clone());
    let transactions = body_json(get_auth(app, "/api/v1/me/transactions", &token).await).await;
    let entries = transactions.as_array().unwrap();
    assert_eq!(entries.len(), 2, "top-up plus booking");
    let booking_entry = entries
        .iter()
        .find(|e| e["transaction_type"] == "booking")
        .expect("ledger should contain a booking entry");
    assert_eq!(booking_entry["amount"], -5);
    assert_eq!(booking_entry["class_id"].as_i64().unwrap(), class_id);

    // /me/bookings lists the class with its address revealed.
    let app = common::build_test_app(pool.clone());
    let bookings = body_json(get_auth(app, "/api/v1/me/bookings", &token).await).await;
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["title"], "Sourdough for beginners");
    assert_eq!(bookings[0]["address"], "12 Harbour Lane, Bristol");

    // The catalog now shows one seat taken.
    let app = common::build_test_app(pool);
    let catalog = body_json(get(app, "/api/v1/classes").await).await;
    assert_eq!(catalog[0]["booked_count"], 1);
    assert_eq!(catalog[0]["seats_remaining"], 9);
}

/// Teaching credits are spent before topped-up credits.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_spends_teaching_balance_first(pool: PgPool) {
    let class_id = seed_class(&pool).await;

    // Give the member 3 purchased credits (£6) and 2 earned ones, and
    // drop the class price to 4 so the split is observable.
    let signup = signup_user(&pool, "mixed@test.com", "Mixed Balance").await;
    let user_id = signup["user"]["id"].as_i64().unwrap();
    let token = signup["access_token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/me/credits/top-up",
        serde_json::json!({ "pounds": 6.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    sqlx::query("UPDATE credits SET teaching_balance = 2 WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .expect("seeding teaching balance should succeed");
    sqlx::query("UPDATE classes SET cost_credits = 4 WHERE id = $1")
        .bind(class_id)
        .execute(&pool)
        .await
        .expect("repricing should succeed");

    let response = book(&pool, class_id, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    // Cost 4 = 2 teaching + 2 topped-up, leaving 1 purchased credit.
    assert_eq!(json["credits"]["teaching_balance"], 0);
    assert_eq!(json["credits"]["topped_up_balance"], 1);
    assert_eq!(json["credits"]["total_balance"], 1);
}

// ---------------------------------------------------------------------------
// Admission rules
// ---------------------------------------------------------------------------

/// Booking without enough combined credits is rejected and rolls back.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_insufficient_credits(pool: PgPool) {
    let class_id = seed_class(&pool).await;
    let signup = signup_user(&pool, "broke@test.com", "Broke Guest").await;
    let token = signup["access_token"].as_str().unwrap().to_string();

    let response = book(&pool, class_id, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap_or("").contains("Insufficient credits"),
        "error should name the missing credits"
    );

    // Nothing was written: no booking, no ledger entry, seat count intact.
    let app = common::build_test_app(pool.clone());
    let bookings = body_json(get_auth(app, "/api/v1/me/bookings", &token).await).await;
    assert_eq!(bookings.as_array().map(Vec::len), Some(0));

    let app = common::build_test_app(pool.clone());
    let transactions = body_json(get_auth(app, "/api/v1/me/transactions", &token).await).await;
    assert_eq!(transactions.as_array().map(Vec::len), Some(0));

    let app = common::build_test_app(pool);
    let catalog = body_json(get(app, "/api/v1/classes").await).await;
    assert_eq!(catalog[0]["seats_remaining"], 10);
}

/// Hosts cannot book their own classes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_own_class_forbidden(pool: PgPool) {
    let (_host_id, host_token) = make_verified_host(&pool, "selfish@test.com", "Selfish").await;
    let class = create_class(&pool, &host_token, "Sourdough for beginners", "Cooking").await;
    let class_id = class["id"].as_i64().unwrap();

    let response = book(&pool, class_id, &host_token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A second booking of the same class by the same member returns 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_booking_conflict(pool: PgPool) {
    let class_id = seed_class(&pool).await;
    let token = member_with_credits(&pool, "eager@test.com", "Eager Guest").await;

    let response = book(&pool, class_id, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = book(&pool, class_id, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Only the first booking and its single debit survive.
    let app = common::build_test_app(pool.clone());
    let bookings = body_json(get_auth(app, "/api/v1/me/bookings", &token).await).await;
    assert_eq!(bookings.as_array().map(Vec::len), Some(1));

    let app = common::build_test_app(pool);
    let me = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(me["credits"]["total_balance"], 5);
}

/// A full class rejects further bookings with 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_full_class(pool: PgPool) {
    let class_id = seed_class(&pool).await;
    // Shrink the class to one seat rather than seeding ten guests.
    sqlx::query("UPDATE classes SET max_participants = 1 WHERE id = $1")
        .bind(class_id)
        .execute(&pool)
        .await
        .expect("shrinking capacity should succeed");

    let first = member_with_credits(&pool, "first@test.com", "First Guest").await;
    let response = book(&pool, class_id, &first).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = member_with_credits(&pool, "second@test.com", "Second Guest").await;
    let response = book(&pool, class_id, &second).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap_or("").contains("full"),
        "error should say the class is full"
    );

    // The loser keeps their credits.
    let app = common::build_test_app(pool);
    let me = body_json(get_auth(app, "/api/v1/me", &second).await).await;
    assert_eq!(me["credits"]["total_balance"], 10);
}

/// Booking an unknown class returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_unknown_class(pool: PgPool) {
    let token = member_with_credits(&pool, "lost@test.com", "Lost Guest").await;

    let response = book(&pool, 9999, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Booking requires authentication and writes nothing on 401.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_requires_auth(pool: PgPool) {
    let class_id = seed_class(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        &format!("/api/v1/classes/{class_id}/bookings"),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let catalog = body_json(get(app, "/api/v1/classes").await).await;
    assert_eq!(catalog[0]["booked_count"], 0);
}
