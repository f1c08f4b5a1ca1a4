//! Password hashing with bcrypt
//!
//! Passwords are only ever stored as salted bcrypt hashes.

use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password with the given bcrypt work factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(password, cost).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::Hash(e.to_string()))
}
