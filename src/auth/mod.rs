pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{password_policy_violations, PasswordHasher};
pub use token::{Claims, TokenService};

lazy_static! {
    // Letters, digits and -._@+
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9\-._@+]+$").unwrap();
}

pub const MAX_USERNAME_LEN: usize = 256;

/// Messages for every username rule `username` breaks: at most 256 characters,
/// letters, digits and `-._@+` only.
pub fn username_violations(username: &str) -> Vec<String> {
    let mut violations = Vec::new();
    if username.chars().count() > MAX_USERNAME_LEN {
        violations.push(format!(
            "The Username field must be at most {} characters.",
            MAX_USERNAME_LEN
        ));
    }
    if !USERNAME_REGEX.is_match(username) {
        violations.push("Username is invalid, can only contain letters or digits.".to_string());
    }
    violations
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username. Alphabet and length are checked with the password rules,
    /// see `username_violations`.
    #[validate(length(min = 1, message = "The Username field is required."))]
    pub username: String,
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    /// Complexity rules are checked after the email conflict check,
    /// see `password_policy_violations`.
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

/// Body returned by the register and login endpoints.
///
/// Failures carry `success: false`, no token and at least one message in `errors`;
/// `AppError` renders the same shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AuthResponse {
    pub fn authenticated(token: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            errors: Vec::new(),
        }
    }
}
