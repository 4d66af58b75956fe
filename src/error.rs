//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can produce, from payload validation to a lost database
//! connection, is one of its variants.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers return
//! `Result<_, AppError>` and actix renders the error as a JSON body of the shape
//! `{"success": false, "errors": [...]}` with the matching status code.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, `bcrypt::BcryptError` and actix's `BlockingError`
//! allow conversion with the `?` operator.

use actix_web::{
    error::{BlockingError, ResponseError},
    http::{header, StatusCode},
    HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned for any unparseable request body or path segment.
pub const INVALID_PAYLOAD: &str = "Invalid payload";

/// Message returned for both an unknown email and a wrong password.
pub const INVALID_LOGIN: &str = "Invalid login request";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request carried no bearer token (HTTP 401).
    Unauthorized(String),
    /// A bearer token was presented but rejected: bad signature, expired, malformed (HTTP 401).
    InvalidToken(String),
    /// The payload failed shape checks or user/password rules (HTTP 400).
    /// Carries every violation found.
    Validation(Vec<String>),
    /// The email is already registered (HTTP 400).
    Conflict(String),
    /// Unknown email or wrong password (HTTP 400). Deliberately carries no detail.
    InvalidCredentials,
    /// A well-formed request the endpoint refuses, e.g. mismatched ids (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The store failed (HTTP 500). The detail is logged, never sent to the client.
    DatabaseError(String),
    /// Hashing, signing or configuration failed (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// Shorthand for a validation failure with a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// The messages placed in the `errors` array of the response body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(messages) => messages.clone(),
            AppError::InvalidCredentials => vec![INVALID_LOGIN.to_string()],
            AppError::DatabaseError(_) => vec!["Database error".to_string()],
            AppError::Unauthorized(msg)
            | AppError::InvalidToken(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => vec![msg.clone()],
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidToken(msg) => write!(f, "Invalid Token: {}", msg),
            AppError::Validation(msgs) => write!(f, "Validation Error: {}", msgs.join("; ")),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid Credentials"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// 401 responses carry a `WWW-Authenticate: Bearer` challenge; when a token was
/// presented but rejected the challenge names the `invalid_token` error.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Unauthorized(_) => {
                response.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::InvalidToken(_) => {
                response.insert_header((header::WWW_AUTHENTICATE, r#"Bearer error="invalid_token""#));
            }
            _ => {}
        }
        response.json(json!({
            "success": false,
            "errors": self.messages(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; anything else is logged and reduced to `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => {
                log::error!("database error: {}", error);
                AppError::DatabaseError(error.to_string())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// Each field error contributes its message; fields are reported in name order.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let messages = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("The {} field is invalid.", field),
                })
            })
            .collect();

        AppError::Validation(messages)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::InvalidToken`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

/// The blocking pool refused or dropped the job.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
