//! Registration and login.

use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::{
    password_policy_violations, username_violations, LoginRequest, PasswordHasher, RegisterRequest,
    TokenService,
};
use crate::error::AppError;
use crate::models::user::{normalize, NewUser, User};

/// Issues tokens to new and returning users.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    tokens: &'a TokenService,
    hasher: &'a PasswordHasher,
}

impl<'a> AuthService<'a> {
    pub fn new(pool: &'a SqlitePool, tokens: &'a TokenService, hasher: &'a PasswordHasher) -> Self {
        Self { pool, tokens, hasher }
    }

    /// Creates an account and returns a signed token for it.
    ///
    /// Checks run in order: payload shape, email already in use, then the username
    /// rules, username already taken and password rules, whose violations are
    /// reported together.
    pub async fn register(&self, request: RegisterRequest) -> Result<String, AppError> {
        request.validate()?;

        if self.find_by_email(&request.email).await?.is_some() {
            log::warn!("registration refused: email already in use");
            return Err(AppError::Conflict("Email already in use".into()));
        }

        let mut violations = username_violations(&request.username);
        if self.username_taken(&request.username).await? {
            violations.push(format!("Username '{}' is already taken.", request.username));
        }
        violations.extend(password_policy_violations(&request.password));
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let password_hash = self.hasher.hash(request.password).await?;
        let user = self
            .insert(NewUser::new(request.username, request.email, password_hash))
            .await?;
        log::info!("registered user {}", user.id);

        self.tokens.generate_token(&user)
    }

    /// Verifies credentials and returns a signed token.
    ///
    /// An unknown email and a wrong password produce the same `InvalidCredentials` error.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        request.validate()?;

        let user = match self.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                log::warn!("login refused");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !self
            .hasher
            .verify(request.password, user.password_hash.clone())
            .await?
        {
            log::warn!("login refused");
            return Err(AppError::InvalidCredentials);
        }

        log::info!("user {} logged in", user.id);
        self.tokens.generate_token(&user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE normalized_email = ?",
        )
        .bind(normalize(email))
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_as::<_, (String,)>("SELECT id FROM users WHERE normalized_username = ?")
            .bind(normalize(username))
            .fetch_optional(self.pool)
            .await?;

        Ok(existing.is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, normalized_username, email, normalized_email, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(user.normalized_username())
        .bind(&user.email)
        .bind(user.normalized_email())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.into()),
            // Lost a race with a concurrent registration for the same email or username.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                if db_err.message().contains("normalized_username") {
                    Err(AppError::validation(format!(
                        "Username '{}' is already taken.",
                        user.username
                    )))
                } else {
                    Err(AppError::Conflict("Email already in use".into()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
