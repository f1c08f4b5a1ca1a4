//! Authentication for the task API
//!
//! - Stateless signed bearer tokens (JWT) encoding the user identity
//! - Bcrypt password hashing
//! - Session lifecycle: signup, login, logout via a token blacklist

mod jwt;
mod password;
mod service;

pub use jwt::{issue_token, verify_token, Claims, JwtError};
pub use password::{hash_password, verify_password};
pub use service::{AuthError, AuthService};
