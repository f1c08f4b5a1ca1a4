//! Task HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::models::{CreateTaskRequest, Task, TaskEnvelope, UpdateTaskRequest};
use crate::state::AppState;

/// POST /tasks - Create a task for the authenticated user
pub async fn create_task(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskEnvelope>), ApiError> {
    req.validate()?;

    let task = state.task_service.create_task(current.user.id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskEnvelope {
            message: "Task created successfully".to_string(),
            task,
        }),
    ))
}

/// GET /tasks - List the authenticated user's tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.task_service.list_tasks(current.user.id).await?;

    Ok(Json(tasks))
}

/// GET /tasks/:id - Get one task
pub async fn get_task(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .task_service
        .get_task(current.user.id, task_id)
        .await?;

    Ok(Json(task))
}

/// PATCH /tasks/:id - Partially update a task
pub async fn update_task(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let task = state
        .task_service
        .update_task(current.user.id, task_id, req)
        .await?;

    Ok(Json(TaskEnvelope {
        message: "Task updated successfully".to_string(),
        task,
    }))
}

/// DELETE /tasks/:id - Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskEnvelope>, ApiError> {
    let task = state
        .task_service
        .delete_task(current.user.id, task_id)
        .await?;

    Ok(Json(TaskEnvelope {
        message: "Task deleted successfully".to_string(),
        task,
    }))
}
