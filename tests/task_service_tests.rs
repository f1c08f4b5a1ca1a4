//! Task CRUD tests against a real Postgres database

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use taskforge_server::auth::AuthService;
use taskforge_server::models::{CreateTaskRequest, TaskPriority, TaskStatus, UpdateTaskRequest};
use taskforge_server::tasks::{TaskError, TaskService};

/// Helper to create a test database pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/taskforge_test".to_string());

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Tasks reference users, so each test registers a fresh owner
async fn create_test_user(pool: &PgPool) -> Uuid {
    let auth = AuthService::new(pool.clone(), "test-secret-key".to_string(), 3600, 4);
    let email = format!("owner-{}@example.com", Uuid::new_v4());
    auth.signup("owner", &email, "secret123")
        .await
        .expect("signup should succeed")
        .id
}

fn sample_task() -> CreateTaskRequest {
    CreateTaskRequest {
        title: "Test Task".to_string(),
        description: "Test Description".to_string(),
        due_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
    }
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_task_crud_round_trip() {
    let pool = setup_test_db().await;
    let tasks = TaskService::new(pool.clone());
    let owner = create_test_user(&pool).await;

    let created = tasks.create_task(owner, sample_task()).await.unwrap();
    assert_eq!(created.user_id, owner);
    assert_eq!(created.title, "Test Task");
    assert_eq!(created.status, TaskStatus::Pending);

    let listed = tasks.list_tasks(owner).await.unwrap();
    assert!(listed.iter().any(|t| t.id == created.id));

    let fetched = tasks.get_task(owner, created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);

    let updated = tasks
        .update_task(
            owner,
            created.id,
            UpdateTaskRequest {
                title: Some("Updated Task".to_string()),
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Updated Task");
    assert_eq!(updated.status, TaskStatus::InProgress);
    // Fields absent from the patch are untouched
    assert_eq!(updated.description, "Test Description");

    let deleted = tasks.delete_task(owner, created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);

    let err = tasks.get_task(owner, created.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound));
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_tasks_are_scoped_to_their_owner() {
    let pool = setup_test_db().await;
    let tasks = TaskService::new(pool.clone());
    let alice = create_test_user(&pool).await;
    let mallory = create_test_user(&pool).await;

    let task = tasks.create_task(alice, sample_task()).await.unwrap();

    // Another user cannot see, update, or delete it
    assert!(matches!(
        tasks.get_task(mallory, task.id).await.unwrap_err(),
        TaskError::NotFound
    ));
    assert!(matches!(
        tasks
            .update_task(
                mallory,
                task.id,
                UpdateTaskRequest {
                    title: Some("hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err(),
        TaskError::NotFound
    ));
    assert!(matches!(
        tasks.delete_task(mallory, task.id).await.unwrap_err(),
        TaskError::NotFound
    ));

    // Still intact for the owner
    let fetched = tasks.get_task(alice, task.id).await.unwrap();
    assert_eq!(fetched.title, "Test Task");
}
