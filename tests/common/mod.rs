//! Shared setup for the integration tests: an in-memory database with the
//! schema applied, and helpers that drive the auth endpoints.
#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
};
use serde_json::json;
use sqlx::SqlitePool;
use todo_api::{
    auth::{AuthResponse, TokenService},
    db,
};

pub const TEST_SECRET: &str = "integration_test_secret_0123456789abcdef";
pub const PASSWORD: &str = "Password123!";

/// Builds the full application over `$pool` and `$tokens`, as `main` does,
/// with bcrypt at its minimum cost.
macro_rules! test_app {
    ($pool:expr, $tokens:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($tokens.clone()))
                .app_data(actix_web::web::Data::new(
                    todo_api::auth::PasswordHasher::new(4),
                ))
                .wrap(actix_web::middleware::Logger::default())
                .configure(todo_api::routes::config),
        )
        .await
    };
}

pub async fn memory_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn token_service(lifetime_seconds: i64) -> TokenService {
    TokenService::new(TEST_SECRET, chrono::Duration::seconds(lifetime_seconds), 0)
}

/// Posts `payload` to `uri` and returns the status with the parsed auth body.
pub async fn post_auth(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    uri: &str,
    payload: serde_json::Value,
) -> (StatusCode, AuthResponse) {
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let parsed = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Failed to parse auth response ({}): {}. Body: {}",
            status,
            e,
            String::from_utf8_lossy(&body)
        )
    });
    (status, parsed)
}

/// Registers a user with the standard test password and returns its token.
pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    email: &str,
) -> String {
    let (status, response) = post_auth(
        app,
        "/api/AuthManagement/Register",
        json!({ "username": username, "email": email, "password": PASSWORD }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "Registration failed: {:?}", response);
    response.token.expect("Successful registration must carry a token")
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token),
    )
}
