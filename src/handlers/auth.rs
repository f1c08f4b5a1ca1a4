//! Authentication HTTP handlers
//!
//! Signup, login and logout endpoints.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse};
use crate::state::AppState;

/// POST /users/signup - Register a new user
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    req.validate()?;

    let user = state
        .auth_service
        .signup(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// POST /users/login - Verify credentials and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse { token }))
}

/// POST /users/logout - Blacklist the presented token
///
/// The gate has already run, so the caller is authenticated; revoking an
/// already-revoked token succeeds quietly.
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .auth_service
        .logout(&current.token, current.token_expires_at)
        .await?;

    Ok(Json(MessageResponse {
        message: "User logged out successfully".to_string(),
    }))
}
