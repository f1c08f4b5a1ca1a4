//! HTTP handlers for the task API

pub mod auth;
pub mod task;
