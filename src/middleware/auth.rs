//! Authentication middleware
//!
//! Extractor that gates every protected route: it resolves the bearer token
//! to a stored user or rejects the request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::auth::{verify_token, AuthError, AuthService};
use crate::error::ApiError;
use crate::models::User;

/// Authenticated identity attached to the request
///
/// Carries the resolved user record plus the raw token string (logout
/// blacklists exactly the presented string) and its decoded expiry.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
    pub token_expires_at: DateTime<Utc>,
}

/// Extractor for authenticated users
///
/// Evaluation is strictly ordered and short-circuits on the first failure:
/// 1. missing bearer token → 401
/// 2. token blacklisted → 401, checked BEFORE cryptographic verification so
///    a revoked-but-valid token is never partially trusted
/// 3. malformed / bad signature / expired → 401
/// 4. subject has no backing user → 404
/// 5. success: user attached to the request
///
/// Reads only; never writes.
#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ApiError::Unauthorized("Token required".to_string()).into_response()
                })?;

        let token = bearer.token().to_string();
        let auth_service = Arc::<AuthService>::from_ref(state);

        let revoked = auth_service
            .is_token_revoked(&token)
            .await
            .map_err(|e| ApiError::from(e).into_response())?;
        if revoked {
            return Err(
                ApiError::Unauthorized("Token revoked, please log in again".to_string())
                    .into_response(),
            );
        }

        // Failure kinds stay distinguishable in the logs; the response body
        // is uniform.
        let claims = verify_token(&token, auth_service.jwt_secret()).map_err(|e| {
            tracing::debug!(reason = %e, "Token verification failed");
            ApiError::Unauthorized("Invalid token".to_string()).into_response()
        })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::debug!(reason = %e, "Token subject is not a user id");
            ApiError::Unauthorized("Invalid token".to_string()).into_response()
        })?;

        let user = match auth_service.find_user_by_id(user_id).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                return Err(ApiError::NotFound("User not found".to_string()).into_response())
            }
            Err(e) => return Err(ApiError::from(e).into_response()),
        };

        Ok(CurrentUser {
            user,
            token,
            token_expires_at: claims.expires_at(),
        })
    }
}
