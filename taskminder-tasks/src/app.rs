/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskminder_tasks::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::connect(config).await?;
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use taskminder_shared::{
    client::notifications::NotificationServiceClient,
    config::DatabaseBackend,
    db::{client::connect, indexes::ensure_task_indexes},
    http::server::with_middleware,
    repos::{inmemory::InMemoryTaskRepo, mongo::MongoTaskRepo, TaskRepo},
};
use tracing::{info, warn};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Task storage
    pub tasks: Arc<dyn TaskRepo>,

    /// Reminder scheduling
    pub notifications: NotificationServiceClient,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state over an existing repository
    pub fn new(tasks: Arc<dyn TaskRepo>, config: Config) -> anyhow::Result<Self> {
        let notifications = NotificationServiceClient::new(
            &config.notification_service.url,
            config.notification_service.timeout(),
        )?;

        Ok(Self {
            tasks,
            notifications,
            config: Arc::new(config),
        })
    }

    /// Opens the configured storage backend and creates state over it
    ///
    /// # Errors
    ///
    /// Returns an error if MongoDB is unreachable or index creation fails.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let tasks: Arc<dyn TaskRepo> = match config.storage.backend {
            DatabaseBackend::Mongo => {
                let db = connect(&config.storage.database).await?;
                ensure_task_indexes(&db).await?;
                info!(database = %config.storage.database.database, "Using MongoDB storage");
                Arc::new(MongoTaskRepo::new(&db))
            }
            DatabaseBackend::Memory => {
                warn!("Using in-memory storage; tasks are lost on restart");
                Arc::new(InMemoryTaskRepo::new())
            }
        };

        Self::new(tasks, config)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /api/v1/tasks
///     ├── POST   /
///     ├── GET    /
///     ├── GET    /stats/overview
///     ├── GET    /:id
///     ├── PUT    /:id
///     ├── DELETE /:id
///     └── PATCH  /:id/complete
/// ```
pub fn build_router(state: AppState) -> Router {
    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/tasks/stats/overview", get(routes::tasks::task_stats))
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/tasks/:id/complete", patch(routes::tasks::complete_task));

    let router = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", task_routes);

    with_middleware(router, &state.config.api).with_state(state)
}
