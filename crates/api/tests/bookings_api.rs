//! HTTP-level integration tests for the bookings API: seat holds, inventory
//! and occupancy updates, seat conflicts, ownership, and cancellation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_auth, post_json_auth, user_token};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_seats_creates_reserved_hold(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        &user_token(7),
        serde_json::json!({
            "showtime_id": id,
            "seat_count": 2,
            "seat_numbers": ["B1", "B2"],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 1); // Reserved
    assert_eq!(json["data"]["seat_count"], 2);
    assert_eq!(json["data"]["total_price_cents"], 3000);
    assert!(json["data"]["reservation_expiry"].is_string());
    assert!(json["data"]["payment_transaction_id"].is_null());

    // Inventory decremented.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/showtimes/{id}")).await).await;
    assert_eq!(json["data"]["available_seats"], 48);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_requires_authentication(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/bookings",
        serde_json::json!({"showtime_id": id, "seat_count": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_rejects_invalid_seat_count(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    for count in [0, 11] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/bookings",
            &user_token(7),
            serde_json::json!({"showtime_id": id, "seat_count": count}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_more_than_available_returns_409(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 3, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        &user_token(7),
        serde_json::json!({"showtime_id": id, "seat_count": 4}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_INVENTORY");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_overlapping_seats_returns_409_naming_seats(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    common::book_seats(&pool, 7, id, &["C1", "C2"]).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        &user_token(8),
        serde_json::json!({
            "showtime_id": id,
            "seat_count": 2,
            "seat_numbers": ["C2", "C3"],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SEAT_CONFLICT");
    assert!(
        json["error"].as_str().unwrap().contains("C2"),
        "conflict message should name the contested seat: {}",
        json["error"]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_book_seat_labels_are_case_insensitive(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1500).await;
    let id = showtime["id"].as_i64().unwrap();

    common::book_seats(&pool, 7, id, &["D1"]).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        &user_token(8),
        serde_json::json!({"showtime_id": id, "seat_count": 1, "seat_numbers": ["d1"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_occupancy_status_tracks_fill_ratio(pool: PgPool) {
    // 10 seats: 8 booked crosses the 80% threshold, 10 is sold out.
    let showtime = common::create_showtime(&pool, 10, 1000).await;
    let id = showtime["id"].as_i64().unwrap();

    common::book_seats(&pool, 7, id, &["A1", "A2", "A3", "A4", "A5", "A6", "A7"]).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/showtimes/{id}")).await).await;
    assert_eq!(json["data"]["status_id"], 1); // 70% still Available

    common::book_seats(&pool, 8, id, &["B1"]).await;
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/showtimes/{id}")).await).await;
    assert_eq!(json["data"]["status_id"], 2); // 80% AlmostFull

    common::book_seats(&pool, 9, id, &["B2", "B3"]).await;
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/showtimes/{id}")).await).await;
    assert_eq!(json["data"]["status_id"], 3); // SoldOut
    assert_eq!(json["data"]["available_seats"], 0);
}

// ---------------------------------------------------------------------------
// Lookup and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_mine_returns_only_callers_reservations(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1000).await;
    let id = showtime["id"].as_i64().unwrap();

    common::book_seats(&pool, 7, id, &["A1"]).await;
    common::book_seats(&pool, 7, id, &["A2"]).await;
    common::book_seats(&pool, 8, id, &["A3"]).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/bookings", &user_token(7)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let mine = json["data"].as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r["user_id"] == 7));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_other_users_reservation_is_forbidden(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 50, 1000).await;
    let id = showtime["id"].as_i64().unwrap();
    let reservation = common::book_seats(&pool, 7, id, &["A1"]).await;
    let rid = reservation["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/bookings/{rid}"), &user_token(8)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin can read anyone's reservation.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/bookings/{rid}"),
        &common::admin_token(99),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_cancel_reserved_hold_releases_seats(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 10, 1000).await;
    let id = showtime["id"].as_i64().unwrap();
    let reservation = common::book_seats(&pool, 7, id, &["A1", "A2"]).await;
    let rid = reservation["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/bookings/{rid}/cancel"),
        &user_token(7),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3); // Cancelled
    assert!(json["data"]["reservation_expiry"].is_null());

    // Seats restored and freed for others.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/showtimes/{id}")).await).await;
    assert_eq!(json["data"]["available_seats"], 10);

    common::book_seats(&pool, 8, id, &["A1"]).await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_cancel_twice_returns_409(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 10, 1000).await;
    let id = showtime["id"].as_i64().unwrap();
    let reservation = common::book_seats(&pool, 7, id, &["A1"]).await;
    let rid = reservation["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/bookings/{rid}/cancel"),
        &user_token(7),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/bookings/{rid}/cancel"),
        &user_token(7),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_cancel_other_users_reservation_is_forbidden(pool: PgPool) {
    let showtime = common::create_showtime(&pool, 10, 1000).await;
    let id = showtime["id"].as_i64().unwrap();
    let reservation = common::book_seats(&pool, 7, id, &["A1"]).await;
    let rid = reservation["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/api/v1/bookings/{rid}/cancel"),
        &user_token(8),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
