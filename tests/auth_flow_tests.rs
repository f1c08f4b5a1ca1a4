//! Authentication lifecycle tests
//!
//! These exercise signup, login, logout and revocation against a real
//! Postgres database.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use taskforge_server::auth::{verify_token, AuthError, AuthService};

const TEST_SECRET: &str = "test-secret-key";

/// Helper to create a test database pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/taskforge_test".to_string());

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn test_auth_service(pool: PgPool) -> AuthService {
    // Minimum bcrypt cost keeps the tests fast
    AuthService::new(pool, TEST_SECRET.to_string(), 3600, 4)
}

fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_signup_succeeds_once_then_conflicts() {
    let pool = setup_test_db().await;
    let auth = test_auth_service(pool.clone());
    let email = unique_email();

    let user = auth
        .signup("alice", &email, "secret123")
        .await
        .expect("first signup should succeed");
    assert_eq!(user.email, email);
    assert_ne!(user.password_hash, "secret123");

    let err = auth
        .signup("alice-again", &email, "secret123")
        .await
        .expect_err("duplicate email should be rejected");
    assert!(matches!(err, AuthError::EmailTaken));

    // The failed signup must not have created a second record
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_login_failures_are_identical() {
    let auth = test_auth_service(setup_test_db().await);
    let email = unique_email();

    auth.signup("alice", &email, "secret123").await.unwrap();

    let wrong_password = auth
        .login(&email, "wrongpw")
        .await
        .expect_err("wrong password must fail");
    let unknown_email = auth
        .login("nobody@example.com", "secret123")
        .await
        .expect_err("unknown email must fail");

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_issued_token_resolves_to_subject() {
    let auth = test_auth_service(setup_test_db().await);
    let email = unique_email();

    let user = auth.signup("alice", &email, "secret123").await.unwrap();
    let token = auth.login(&email, "secret123").await.unwrap();

    let claims = verify_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_logout_revokes_exact_token_independent_of_validity() {
    let auth = test_auth_service(setup_test_db().await);
    let email = unique_email();

    auth.signup("alice", &email, "secret123").await.unwrap();
    let token = auth.login(&email, "secret123").await.unwrap();
    let expires_at = verify_token(&token, TEST_SECRET).unwrap().expires_at();

    assert!(!auth.is_token_revoked(&token).await.unwrap());

    auth.logout(&token, expires_at).await.unwrap();
    assert!(auth.is_token_revoked(&token).await.unwrap());

    // The token is still cryptographically valid and unexpired; revocation
    // overrides that.
    assert!(verify_token(&token, TEST_SECRET).is_ok());

    // Logging out an already-revoked token is a no-op success
    auth.logout(&token, expires_at).await.unwrap();
    assert!(auth.is_token_revoked(&token).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_purge_removes_only_expired_revocations() {
    let auth = test_auth_service(setup_test_db().await);
    let email = unique_email();

    auth.signup("alice", &email, "secret123").await.unwrap();
    let live_token = auth.login(&email, "secret123").await.unwrap();
    // Blacklist entry for a token that is already past its own expiry
    let stale_token = format!("stale-{}", Uuid::new_v4());

    auth.logout(&live_token, Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    auth.logout(&stale_token, Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let purged = auth.purge_expired_revocations().await.unwrap();
    assert!(purged >= 1);

    assert!(auth.is_token_revoked(&live_token).await.unwrap());
    assert!(!auth.is_token_revoked(&stale_token).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_user_lookup_after_deletion_fails() {
    let pool = setup_test_db().await;
    let auth = test_auth_service(pool.clone());
    let email = unique_email();

    let user = auth.signup("alice", &email, "secret123").await.unwrap();
    assert!(auth.find_user_by_id(user.id).await.is_ok());

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let err = auth.find_user_by_id(user.id).await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}
