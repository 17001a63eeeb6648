/// Application state and router builder

use crate::{config::Config, dispatcher::ReminderDispatcher, routes, sender::NotificationSender};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use taskminder_shared::{
    config::DatabaseBackend,
    db::{client::connect, indexes::ensure_notification_indexes},
    http::server::with_middleware,
    repos::{
        inmemory::{InMemoryNotificationRepo, InMemoryReminderRepo},
        mongo::{MongoNotificationRepo, MongoReminderRepo},
        NotificationRepo, ReminderRepo,
    },
};
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub reminders: Arc<dyn ReminderRepo>,
    pub notifications: Arc<dyn NotificationRepo>,

    /// Delivery channel
    pub sender: Arc<dyn NotificationSender>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        reminders: Arc<dyn ReminderRepo>,
        notifications: Arc<dyn NotificationRepo>,
        sender: Arc<dyn NotificationSender>,
        config: Config,
    ) -> Self {
        Self {
            reminders,
            notifications,
            sender,
            config: Arc::new(config),
        }
    }

    /// Opens the configured storage backend and creates state over it
    ///
    /// # Errors
    ///
    /// Returns an error if MongoDB is unreachable or index creation fails.
    pub async fn connect(
        config: Config,
        sender: Arc<dyn NotificationSender>,
    ) -> anyhow::Result<Self> {
        let (reminders, notifications): (Arc<dyn ReminderRepo>, Arc<dyn NotificationRepo>) =
            match config.storage.backend {
                DatabaseBackend::Mongo => {
                    let db = connect(&config.storage.database).await?;
                    ensure_notification_indexes(&db).await?;
                    info!(database = %config.storage.database.database, "Using MongoDB storage");
                    (
                        Arc::new(MongoReminderRepo::new(&db)),
                        Arc::new(MongoNotificationRepo::new(&db)),
                    )
                }
                DatabaseBackend::Memory => {
                    warn!("Using in-memory storage; reminders are lost on restart");
                    (
                        Arc::new(InMemoryReminderRepo::new()),
                        Arc::new(InMemoryNotificationRepo::new()),
                    )
                }
            };

        Ok(Self::new(reminders, notifications, sender, config))
    }

    /// Background dispatcher over this state's storage and sender
    pub fn dispatcher(&self) -> ReminderDispatcher {
        ReminderDispatcher::new(
            self.reminders.clone(),
            self.notifications.clone(),
            self.sender.clone(),
            self.config.dispatcher.poll_interval(),
        )
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /api/v1
///     ├── /reminders               POST, GET
///     ├── /reminders/due/check     GET
///     ├── /reminders/:id           GET, PUT, DELETE
///     ├── /notifications/send      POST
///     ├── /notifications/history   GET
///     └── /stats/overview          GET
/// ```
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/reminders",
            get(routes::reminders::list_reminders).post(routes::reminders::create_reminder),
        )
        .route("/reminders/due/check", get(routes::reminders::check_due_reminders))
        .route(
            "/reminders/:id",
            get(routes::reminders::get_reminder)
                .put(routes::reminders::update_reminder)
                .delete(routes::reminders::delete_reminder),
        )
        .route(
            "/notifications/send",
            post(routes::notifications::send_notification),
        )
        .route(
            "/notifications/history",
            get(routes::notifications::notification_history),
        )
        .route("/stats/overview", get(routes::stats::stats_overview));

    let router = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes);

    with_middleware(router, &state.config.api).with_state(state)
}
