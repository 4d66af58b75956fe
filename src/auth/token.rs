use crate::config::JwtConfig;
use crate::error::AppError;
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to.
    #[serde(rename = "Id")]
    pub id: String,
    /// The user's email address.
    pub email: String,
    /// Subject of the token; the user's email.
    pub sub: String,
    /// Unique token id, random per issuance.
    pub jti: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Not-before timestamp (seconds since epoch); equal to `iat`.
    pub nbf: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies HS256-signed bearer tokens with a shared secret.
///
/// Built once at startup and shared with handlers and `AuthMiddleware`
/// through `web::Data<TokenService>`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    /// Creates a service signing with `secret`; issued tokens live for `lifetime`.
    /// `leeway_seconds` is the clock skew tolerated on `exp` and `nbf`.
    pub fn new(secret: &str, lifetime: Duration, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            Duration::seconds(config.expires_in_seconds),
            config.leeway_seconds,
        )
    }

    /// Generates a signed token for `user`.
    ///
    /// Each call yields a different token: the `jti` is a fresh UUID v4.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.lifetime).ok_or_else(|| {
            AppError::InternalServerError("Token lifetime overflows the clock".into())
        })?;
        let claims = Claims {
            id: user.id.clone(),
            email: user.email.clone(),
            sub: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature, expiry and not-before, and decodes its claims.
    ///
    /// Returns `AppError::InvalidToken` if the token is malformed, signed with another
    /// key or algorithm, or expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::InvalidToken(format!("Invalid token: {:?}", e.kind())))
    }
}
