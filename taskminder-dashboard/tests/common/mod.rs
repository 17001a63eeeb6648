/// Common test utilities for integration tests
///
/// `TestContext::new` serves the real task and notification routers over
/// in-memory repositories on ephemeral ports and points the dashboard at
/// them. The notification service's dispatcher is not started; tests drive
/// due checks through its API when they need delivered notifications.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use taskminder_dashboard::{
    app::{build_router, AppState},
    config::Config,
};
use taskminder_notifications::sender::LogSender;
use taskminder_shared::repos::inmemory::{
    InMemoryNotificationRepo, InMemoryReminderRepo, InMemoryTaskRepo,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const UNREACHABLE_SERVICE: &str = "http://127.0.0.1:9/api/v1";

pub struct TestContext {
    pub app: Router,

    /// The notification service router itself, for driving due checks
    pub notifications: Option<Router>,
}

impl TestContext {
    pub async fn new() -> Self {
        let notifications = notification_router();
        let notification_service = format!("{}/api/v1", spawn(notifications.clone()).await);
        let task_service =
            format!("{}/api/v1", spawn(task_router(&notification_service)).await);

        let mut ctx = Self::with_upstreams(&task_service, &notification_service);
        ctx.notifications = Some(notifications);
        ctx
    }

    /// Dashboard over both upstreams missing
    pub fn unreachable() -> Self {
        Self::with_upstreams(UNREACHABLE_SERVICE, UNREACHABLE_SERVICE)
    }

    pub fn with_upstreams(task_service: &str, notification_service: &str) -> Self {
        let mut config = Config::load(&|_: &str| None::<String>).unwrap();
        config.task_service.url = task_service.to_string();
        config.task_service.timeout_seconds = 2;
        config.notification_service.url = notification_service.to_string();
        config.notification_service.timeout_seconds = 2;

        TestContext {
            app: build_router(AppState::new(config).unwrap()),
            notifications: None,
        }
    }

    /// Sends a request and returns the status with the JSON body (`Null` if empty)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.app, method, uri, body).await
    }

    /// Runs a due check on the notification service, bypassing the dashboard
    pub async fn check_due_reminders(&self) -> Value {
        let router = self.notifications.as_ref().expect("notification service is not running");
        let (status, json) = send(router, "GET", "/api/v1/reminders/due/check", None).await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {json}");
        json
    }

    /// Creates a task through the dashboard and returns its JSON
    pub async fn create_task(&self, body: Value) -> Value {
        let (status, json) = self.request("POST", "/api/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
        json
    }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn task_router(notification_service: &str) -> Router {
    let mut config = taskminder_tasks::config::Config::load(&|_: &str| None::<String>).unwrap();
    config.notification_service.url = notification_service.to_string();
    let state =
        taskminder_tasks::app::AppState::new(Arc::new(InMemoryTaskRepo::new()), config).unwrap();
    taskminder_tasks::app::build_router(state)
}

fn notification_router() -> Router {
    let config =
        taskminder_notifications::config::Config::load(&|_: &str| None::<String>).unwrap();
    let state = taskminder_notifications::app::AppState::new(
        Arc::new(InMemoryReminderRepo::new()),
        Arc::new(InMemoryNotificationRepo::new()),
        Arc::new(LogSender),
        config,
    );
    taskminder_notifications::app::build_router(state)
}

/// Serves `router` on an ephemeral port and returns its base URL
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}
