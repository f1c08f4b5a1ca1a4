//! Task Management System API server
//!
//! HTTP service exposing user registration/authentication and per-user task
//! CRUD, backed by PostgreSQL. Authentication uses signed bearer tokens with
//! a blacklist for logout.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use taskforge_server::auth::AuthService;
use taskforge_server::config::Config;
use taskforge_server::db;
use taskforge_server::middleware;
use taskforge_server::models::MessageResponse;
use taskforge_server::routes;
use taskforge_server::state::AppState;
use taskforge_server::tasks::TaskService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting up");

    let db_pool = db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&db_pool)
        .await
        .context("Failed to run migrations")?;

    let auth_service = Arc::new(AuthService::new(
        db_pool.clone(),
        config.jwt_secret.clone(),
        config.token_ttl_seconds,
        config.bcrypt_cost,
    ));
    let task_service = Arc::new(TaskService::new(db_pool.clone()));

    let app_state = AppState::new(auth_service.clone(), task_service);

    // Revoked tokens outlive their usefulness once the token itself has
    // expired; prune them in the background so the blacklist stays bounded.
    let pruner = auth_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match pruner.purge_expired_revocations().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(purged = n, "Pruned expired revoked tokens"),
                Err(e) => tracing::warn!(error = %e, "Failed to prune revoked tokens"),
            }
        }
    });

    let health_db_pool = db_pool.clone();

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(move || health_check(health_db_pool.clone())))
        .merge(routes::user_routes())
        .merge(routes::task_routes())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(&config));

    if config.environment.is_production() {
        app = app.layer(axum::middleware::from_fn(middleware::hsts_header));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Task Management System API".to_string(),
    })
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
async fn health_check(pool: sqlx::PgPool) -> Json<HealthResponse> {
    let db_status = match db::check_health(&pool).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let status = if db_status == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: db_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn configure_cors(config: &Config) -> CorsLayer {
    let Some(allowed_origins) = config.cors_allowed_origins.as_deref() else {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
