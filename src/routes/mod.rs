//! Route definitions for the task API

mod task;
mod user;

pub use task::task_routes;
pub use user::user_routes;
