use crate::error::AppError;
use actix_web::web;
use bcrypt::{hash, verify};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hashes and verifies passwords with bcrypt at a fixed cost.
///
/// bcrypt is deliberately slow, so both operations run on actix's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: String) -> Result<String, AppError> {
        let cost = self.cost;
        Ok(web::block(move || hash(password, cost)).await??)
    }

    /// Returns `Ok(false)` on mismatch. A malformed stored hash is an error.
    pub async fn verify(&self, password: String, hashed_password: String) -> Result<bool, AppError> {
        Ok(web::block(move || verify(password, &hashed_password)).await??)
    }
}

/// Checks `password` against the complexity rules applied when creating a user.
///
/// Every violated rule is reported, in a fixed order. An empty vector means the
/// password is acceptable.
pub fn password_policy_violations(password: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LEN {
        violations.push(format!(
            "Passwords must be at least {} characters.",
            MIN_PASSWORD_LEN
        ));
    }
    if password.chars().all(char::is_alphanumeric) {
        violations.push("Passwords must have at least one non alphanumeric character.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_password_hashing_and_verification() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("Password123!".to_string()).await.unwrap();

        assert_ne!(hashed, "Password123!");
        assert!(hasher.verify("Password123!".into(), hashed.clone()).await.unwrap());
        assert!(!hasher.verify("wrong_password".into(), hashed).await.unwrap());
    }

    #[actix_rt::test]
    async fn test_verify_with_invalid_hash() {
        let hasher = PasswordHasher::new(4);
        match hasher.verify("Password123!".into(), "invalidhashformat".into()).await {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Password hashing failed"))
            }
            Ok(true) => panic!("Password verification should fail for invalid hash format"),
            Ok(false) => {}
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_strong_password_passes_policy() {
        assert!(password_policy_violations("Password123!").is_empty());
    }

    #[test]
    fn test_policy_reports_every_violation() {
        let violations = password_policy_violations("abc");
        assert_eq!(
            violations,
            vec![
                "Passwords must be at least 6 characters.",
                "Passwords must have at least one non alphanumeric character.",
                "Passwords must have at least one digit ('0'-'9').",
                "Passwords must have at least one uppercase ('A'-'Z').",
            ]
        );
    }

    #[test]
    fn test_policy_single_violation() {
        assert_eq!(
            password_policy_violations("password123!"),
            vec!["Passwords must have at least one uppercase ('A'-'Z')."]
        );
        assert_eq!(
            password_policy_violations("Password123"),
            vec!["Passwords must have at least one non alphanumeric character."]
        );
    }
}
