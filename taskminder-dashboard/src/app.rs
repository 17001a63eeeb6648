/// Application state and router builder

use crate::{config::Config, routes};
use axum::{
    routing::{get, patch, put},
    Router,
};
use std::sync::Arc;
use taskminder_shared::{
    client::{notifications::NotificationServiceClient, tasks::TaskServiceClient},
    http::server::with_middleware,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskServiceClient,
    pub notifications: NotificationServiceClient,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the upstream clients
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream URL is malformed.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            tasks: TaskServiceClient::new(&config.task_service.url, config.task_service.timeout())?,
            notifications: NotificationServiceClient::new(
                &config.notification_service.url,
                config.notification_service.timeout(),
            )?,
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /api
///     ├── GET    /dashboard
///     ├── GET    /tasks
///     ├── POST   /tasks
///     ├── GET    /tasks/:id
///     ├── PUT    /tasks/:id
///     ├── DELETE /tasks/:id
///     ├── PATCH  /tasks/:id/complete
///     ├── GET    /notifications
///     └── GET    /analytics
/// ```
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::summary))
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/tasks/:id/complete", patch(routes::tasks::complete_task))
        .route("/notifications", get(routes::notifications::overview))
        .route("/analytics", get(routes::analytics::analytics));

    let router = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes);

    with_middleware(router, &state.config.api).with_state(state)
}
