/// Common test utilities for integration tests
///
/// Tests run the real router over the in-memory repository, so no MongoDB
/// is needed. Unless a test passes its own, the notification service URL
/// points at a closed port.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use taskminder_shared::{
    error::{RepoError, RepoResult},
    models::{
        id::DocumentId,
        page::Page,
        task::{Task, TaskFilter, TaskUpdate},
    },
    repos::{inmemory::InMemoryTaskRepo, TaskRepo},
};
use taskminder_tasks::{
    app::{build_router, AppState},
    config::Config,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const UNREACHABLE_SERVICE: &str = "http://127.0.0.1:9/api/v1";

pub const DRIVER_ERROR: &str = "connection refused by mongodb:27017";

/// Test context containing the app and its storage
pub struct TestContext {
    pub app: Router,
    pub tasks: Arc<InMemoryTaskRepo>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_notification_service(UNREACHABLE_SERVICE)
    }

    pub fn with_notification_service(url: &str) -> Self {
        let tasks = Arc::new(InMemoryTaskRepo::new());
        TestContext {
            app: router(tasks.clone(), url),
            tasks,
        }
    }

    /// App whose storage fails every call; `tasks` is left empty and unused
    pub fn with_failing_storage() -> Self {
        TestContext {
            app: router(Arc::new(FailingTaskRepo), UNREACHABLE_SERVICE),
            tasks: Arc::new(InMemoryTaskRepo::new()),
        }
    }

    /// Sends a request and returns the status with the JSON body (`Null` if empty)
    pub async fn request(
        &self,
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

        let response = self.app.clone().oneshot(request).await.unwrap();
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

    /// Creates a task and returns its JSON
    pub async fn create_task(&self, body: Value) -> Value {
        let (status, json) = self.request("POST", "/api/v1/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
        json
    }
}

fn router(tasks: Arc<dyn TaskRepo>, notification_service: &str) -> Router {
    let mut config = Config::load(&|_: &str| None::<String>).unwrap();
    config.notification_service.url = notification_service.to_string();
    config.notification_service.timeout_seconds = 2;

    build_router(AppState::new(tasks, config).unwrap())
}

/// Task storage that is down
pub struct FailingTaskRepo;

fn driver_error<T>() -> RepoResult<T> {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, DRIVER_ERROR);
    Err(RepoError::Database(io.into()))
}

#[async_trait]
impl TaskRepo for FailingTaskRepo {
    async fn insert(&self, _task: &Task) -> RepoResult<()> {
        driver_error()
    }

    async fn find(&self, _id: &DocumentId) -> RepoResult<Option<Task>> {
        driver_error()
    }

    async fn find_many(&self, _filter: &TaskFilter, _page: Page) -> RepoResult<Vec<Task>> {
        driver_error()
    }

    async fn update(
        &self,
        _id: &DocumentId,
        _update: &TaskUpdate,
        _now: DateTime<Utc>,
    ) -> RepoResult<Option<Task>> {
        driver_error()
    }

    async fn complete(&self, _id: &DocumentId, _now: DateTime<Utc>) -> RepoResult<Option<Task>> {
        driver_error()
    }

    async fn delete(&self, _id: &DocumentId) -> RepoResult<bool> {
        driver_error()
    }

    async fn count(&self, _filter: &TaskFilter) -> RepoResult<u64> {
        driver_error()
    }

    async fn ping(&self) -> RepoResult<()> {
        driver_error()
    }
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
