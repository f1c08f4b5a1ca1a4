//! Task routes (all gate-protected via the CurrentUser extractor)

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::task;
use crate::state::AppState;

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(task::create_task))
        .route("/tasks", get(task::list_tasks))
        .route("/tasks/:id", get(task::get_task))
        .route("/tasks/:id", patch(task::update_task))
        .route("/tasks/:id", delete(task::delete_task))
}
