//! Middleware for the task API
//!
//! Request tracing, security headers, and the authentication gate.

pub mod auth;
mod security;
mod tracing;

pub use auth::CurrentUser;
pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
