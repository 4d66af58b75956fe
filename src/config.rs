//! Application configuration loaded from environment variables.
//!
//! `main` calls `dotenv` first, so any of these may also come from a `.env` file.

use std::env;
use std::fmt;
use std::str::FromStr;

/// HS256 keys shorter than the hash output weaken the signature.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Upper bound for `JWT_EXPIRES_IN_SECONDS`: one day.
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
}

/// Settings for issuing and verifying bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of an issued token.
    pub expires_in_seconds: i64,
    /// Clock skew tolerated when checking `exp` and `nbf`.
    pub leeway_seconds: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unset keys fall back to defaults,
    /// except `JWT_SECRET` which is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} bytes", MIN_JWT_SECRET_LEN),
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", 12)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: "must be between 4 and 31".into(),
            });
        }

        let expires_in_seconds = parse_or(&lookup, "JWT_EXPIRES_IN_SECONDS", 30)?;
        if !(1..=MAX_TOKEN_LIFETIME_SECONDS).contains(&expires_in_seconds) {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRES_IN_SECONDS",
                reason: format!("must be between 1 and {}", MAX_TOKEN_LIFETIME_SECONDS),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://todo.db?mode=rwc".to_string()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt: JwtConfig {
                secret,
                expires_in_seconds,
                leeway_seconds: parse_or(&lookup, "JWT_LEEWAY_SECONDS", 0)?,
            },
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.database_url, "sqlite://todo.db?mode=rwc");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.jwt.expires_in_seconds, 30);
        assert_eq!(config.jwt.leeway_seconds, 0);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("JWT_EXPIRES_IN_SECONDS", "300"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.jwt.expires_in_seconds, 300);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_secret_is_required() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
        assert_eq!(err.to_string(), "JWT_SECRET must be set");
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "short")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_SECRET", .. }));
    }

    #[test]
    fn test_unparseable_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("SERVER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SERVER_PORT", .. }));

        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", SECRET), ("BCRYPT_COST", "2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BCRYPT_COST", .. }));

        for expiry in ["0", "-30", "86401", "9223372036854775"] {
            let err = Config::from_lookup(lookup_from(&[
                ("JWT_SECRET", SECRET),
                ("JWT_EXPIRES_IN_SECONDS", expiry),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "JWT_EXPIRES_IN_SECONDS", .. }),
                "expiry {} was accepted",
                expiry
            );
        }
    }

    #[test]
    fn test_longest_token_lifetime_builds_a_working_token_service() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRES_IN_SECONDS", "86400"),
        ]))
        .unwrap();
        assert_eq!(config.jwt.expires_in_seconds, MAX_TOKEN_LIFETIME_SECONDS);

        let tokens = crate::auth::TokenService::from_config(&config.jwt);
        let user: crate::models::User =
            crate::models::NewUser::new("alice".into(), "alice@example.com".into(), String::new())
                .into();
        let token = tokens.generate_token(&user).unwrap();
        assert_eq!(tokens.verify_token(&token).unwrap().email, "alice@example.com");
    }
}
