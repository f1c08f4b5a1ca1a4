//! Data models for the task API server

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

pub mod task;
pub use task::*;

/// User model
///
/// The password credential is stored only as a bcrypt hash and is never
/// serialized into responses.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Signup request body
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User response (sanitized for API)
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Login response carrying the bearer token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Simple message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$"));
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignupRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }
}
