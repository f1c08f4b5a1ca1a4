//! Task API server library
//!
//! Exports the core modules: authentication (token issuance, verification
//! gate, blacklist revocation), per-user task CRUD, and the surrounding
//! HTTP plumbing.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod tasks;
