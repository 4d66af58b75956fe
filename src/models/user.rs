use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// UUID v4, assigned at registration.
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted; the password is already hashed.
#[derive(Debug)]
pub struct NewUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn normalized_username(&self) -> String {
        normalize(&self.username)
    }

    pub fn normalized_email(&self) -> String {
        normalize(&self.email)
    }
}

impl From<NewUser> for User {
    fn from(user: NewUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
        }
    }
}

/// Case-folds a username or email for uniqueness checks and lookups.
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = NewUser::new("alice".into(), "alice@example.com".into(), "hash".into());
        let b = NewUser::new("alice".into(), "alice@example.com".into(), "hash".into());

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_normalization_is_case_insensitive() {
        let user = NewUser::new("Alice".into(), "Alice@Example.com".into(), "hash".into());

        assert_eq!(user.normalized_username(), "ALICE");
        assert_eq!(user.normalized_email(), normalize("alice@example.COM"));
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user: User = NewUser::new("alice".into(), "a@example.com".into(), "secret-hash".into()).into();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@example.com");
    }
}
