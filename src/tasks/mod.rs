//! Task management
//!
//! Per-user task CRUD; every operation is scoped to the owning user.

mod service;

pub use service::{TaskError, TaskService};
