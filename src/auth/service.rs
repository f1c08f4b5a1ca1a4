//! Authentication service
//!
//! Session lifecycle: signup writes the credential store, login verifies
//! credentials and mints a token, logout blacklists the presented token.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::User;

use super::jwt::{issue_token, JwtError};
use super::password::{hash_password, verify_password, PasswordError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists, please login")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        // A storage-level unique violation on users.email is the authoritative
        // duplicate check; the pre-insert lookup only short-circuits.
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return AuthError::EmailTaken;
            }
        }
        AuthError::Database(e.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Token(e.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Hash(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::EmailTaken => ApiError::Conflict(e.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            AuthError::UserNotFound => ApiError::NotFound(e.to_string()),
            AuthError::Token(_) | AuthError::Hash(_) => ApiError::InternalError(e.to_string()),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    token_ttl_seconds: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        db_pool: PgPool,
        jwt_secret: String,
        token_ttl_seconds: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            db_pool,
            jwt_secret,
            token_ttl_seconds,
            bcrypt_cost,
        }
    }

    /// Register a new user
    ///
    /// Fails with `EmailTaken` when the email is already registered. The
    /// insert either fully creates the user or creates nothing.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let existing: Option<User> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let user_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(User {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: now,
        })
    }

    /// Verify credentials and mint a bearer token
    ///
    /// Unknown email and wrong password return the identical error so the
    /// response gives no signal which one failed.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        let user = user.ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(user.id, &self.jwt_secret, self.token_ttl_seconds)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    /// Blacklist a token (logout)
    ///
    /// Idempotent: revoking an already-revoked token is a no-op success.
    /// `expires_at` mirrors the token's own expiry so the entry can be
    /// pruned once the token would have died anyway.
    pub async fn logout(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token, expires_at, revoked_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .bind(expires_at)
        .execute(&self.db_pool)
        .await?;

        Ok(())
    }

    /// Check whether the exact token string has been revoked
    pub async fn is_token_revoked(&self, token: &str) -> Result<bool, AuthError> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)")
                .bind(token)
                .fetch_one(&self.db_pool)
                .await?;

        Ok(revoked)
    }

    /// Look up a user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::UserNotFound)
    }

    /// Delete blacklist entries for tokens that are past their own expiry
    pub async fn purge_expired_revocations(&self) -> Result<u64, AuthError> {
        let rows_affected = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(&self.db_pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Get JWT secret (for middleware access)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let unknown_email = AuthError::InvalidCredentials;
        let wrong_password = AuthError::InvalidCredentials;
        assert_eq!(unknown_email.to_string(), wrong_password.to_string());

        let a: ApiError = unknown_email.into();
        let b: ApiError = wrong_password.into();
        assert_eq!(a.status_code(), b.status_code());
        assert_eq!(a.error_code(), b.error_code());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_error_translation() {
        let api: ApiError = AuthError::EmailTaken.into();
        assert_eq!(api.status_code(), axum::http::StatusCode::CONFLICT);

        let api: ApiError = AuthError::UserNotFound.into();
        assert_eq!(api.status_code(), axum::http::StatusCode::NOT_FOUND);

        let api: ApiError = AuthError::Database("boom".to_string()).into();
        assert_eq!(
            api.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
