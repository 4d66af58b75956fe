use crate::{
    auth::{AuthResponse, LoginRequest, PasswordHasher, RegisterRequest, TokenService},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::SqlitePool;

/// Register a new user
///
/// Creates a new user account and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{"success": true, "token": "...", "errors": []}`.
/// - `400 Bad Request`: invalid payload, email already in use, or username/password
///   rules violated; every violation is listed in `errors`.
#[post("/Register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    tokens: web::Data<TokenService>,
    hasher: web::Data<PasswordHasher>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let token = AuthService::new(pool.get_ref(), tokens.get_ref(), hasher.get_ref())
        .register(register_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::authenticated(token)))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{"success": true, "token": "...", "errors": []}`.
/// - `400 Bad Request`: invalid payload, or `"Invalid login request"` for an unknown
///   email and a wrong password alike.
#[post("/Login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    tokens: web::Data<TokenService>,
    hasher: web::Data<PasswordHasher>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = AuthService::new(pool.get_ref(), tokens.get_ref(), hasher.get_ref())
        .login(login_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::authenticated(token)))
}
