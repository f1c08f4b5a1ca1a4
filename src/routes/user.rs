//! User authentication routes

use axum::{routing::post, Router};

use crate::handlers::auth;
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(auth::signup))
        .route("/users/login", post(auth::login))
        .route("/users/logout", post(auth::logout))
}
