use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use thetable_api::auth::jwt::JwtConfig;
use thetable_api::config::ServerConfig;
use thetable_api::router::build_app_router;
use thetable_api::state::AppState;
use thetable_db::repositories::ProfileRepo;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: "test-uploads".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Delegates to the same `build_app_router` that `main.rs` uses, so
/// integration tests exercise the production middleware stack (CORS,
/// request ID, timeout, tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Like [`build_test_app`], but with a caller-supplied config. Used by
/// photo upload tests that point `upload_dir` at a temp directory.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with no Authorization header.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and no Authorization header.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a Bearer token.
pub async fn put_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Password used for every test account created through [`signup_user`].
pub const TEST_PASSWORD: &str = "table-pass-1";

/// Sign up a member via the API and return the parsed auth response
/// (`access_token`, `refresh_token`, `user`).
pub async fn signup_user(pool: &PgPool, email: &str, full_name: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": email,
        "password": TEST_PASSWORD,
        "full_name": full_name,
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Sign up a member, fill in their profile location via the API, and flip
/// the `host_verified` flag directly. Returns `(user_id, access_token)`.
pub async fn make_verified_host(pool: &PgPool, email: &str, full_name: &str) -> (i64, String) {
    let signup = signup_user(pool, email, full_name).await;
    let user_id = signup["user"]["id"].as_i64().unwrap();
    let token = signup["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "city": "Bristol", "country": "UK" });
    let response = put_json_auth(app, "/api/v1/me/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    ProfileRepo::set_host_verified(pool, user_id, true)
        .await
        .expect("host verification should succeed");

    (user_id, token)
}

/// A valid class payload scheduled 30 days out.
pub fn class_body(title: &str, category: &str) -> serde_json::Value {
    let class_date = (chrono::Utc::now().date_naive() + chrono::Duration::days(30)).to_string();
    serde_json::json!({
        "title": title,
        "description": "Hands-on session with everything provided, beginners welcome.",
        "category": category,
        "address": "12 Harbour Lane, Bristol",
        "class_date": class_date,
        "start_time": "18:00:00",
        "duration_hours": 2,
        "what_to_bring": "An apron",
    })
}

/// Create a class via the API and return its JSON.
pub async fn create_class(
    pool: &PgPool,
    token: &str,
    title: &str,
    category: &str,
) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/classes", class_body(title, category), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Sign up a member and top up £20 (10 credits) via the API. Returns their
/// access token.
pub async fn member_with_credits(pool: &PgPool, email: &str, full_name: &str) -> String {
    let signup = signup_user(pool, email, full_name).await;
    let token = signup["access_token"].as_str().unwrap().to_string();

    let app = build_test_app(pool.clone());
    let body = serde_json::json!({ "pounds": 20.0 });
    let response = post_json_auth(app, "/api/v1/me/credits/top-up", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    token
}
