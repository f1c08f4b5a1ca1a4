//! Task service
//!
//! CRUD over the tasks table. Single-task lookups are always scoped by
//! owner, so a task belonging to another user is indistinguishable from a
//! missing one.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

/// Task service errors
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for TaskError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => TaskError::NotFound,
            _ => TaskError::Database(e.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::NotFound => ApiError::NotFound(e.to_string()),
            TaskError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

const TASK_COLUMNS: &str = "id, user_id, title, description, due_date, priority, status, created_at";

/// Task service
#[derive(Clone)]
pub struct TaskService {
    db_pool: PgPool,
}

impl TaskService {
    /// Create a new TaskService
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a task owned by the given user
    pub async fn create_task(
        &self,
        user_id: Uuid,
        req: CreateTaskRequest,
    ) -> Result<Task, TaskError> {
        let task: Task = sqlx::query_as(&format!(
            r#"
            INSERT INTO tasks (id, user_id, title, description, due_date, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.due_date)
        .bind(req.priority)
        .bind(req.status)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(task_id = %task.id, user_id = %user_id, "Task created");

        Ok(task)
    }

    /// List all tasks owned by the given user
    pub async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, TaskError> {
        let tasks: Vec<Task> = sqlx::query_as(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(tasks)
    }

    /// Get one task by id
    pub async fn get_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Task, TaskError> {
        sqlx::query_as(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#
        ))
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Partially update a task; absent fields keep their current value
    pub async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        req: UpdateTaskRequest,
    ) -> Result<Task, TaskError> {
        let task: Option<Task> = sqlx::query_as(&format!(
            r#"
            UPDATE tasks
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                due_date = COALESCE($5, due_date),
                priority = COALESCE($6, priority),
                status = COALESCE($7, status)
            WHERE id = $1 AND user_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task_id)
        .bind(user_id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.due_date)
        .bind(req.priority)
        .bind(req.status)
        .fetch_optional(&self.db_pool)
        .await?;

        task.ok_or(TaskError::NotFound)
    }

    /// Delete a task, returning the deleted record
    pub async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Task, TaskError> {
        let task: Option<Task> = sqlx::query_as(&format!(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(task) = &task {
            tracing::info!(task_id = %task.id, user_id = %user_id, "Task deleted");
        }

        task.ok_or(TaskError::NotFound)
    }
}
