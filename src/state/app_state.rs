//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::tasks::TaskService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub task_service: Arc<TaskService>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, task_service: Arc<TaskService>) -> Self {
        Self {
            auth_service,
            task_service,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<TaskService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.task_service.clone()
    }
}
