/// Common test utilities for integration tests
///
/// The router runs over in-memory repositories with a sender that records
/// what it delivered and can be switched to refuse deliveries.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use taskminder_notifications::{
    app::{build_router, AppState},
    config::Config,
    sender::{NotificationSender, SendError},
};
use taskminder_shared::{
    models::notification::Notification,
    repos::inmemory::{InMemoryNotificationRepo, InMemoryReminderRepo},
};
use tower::ServiceExt;

/// Sender keeping the titles it delivered
#[derive(Default)]
pub struct RecordingSender {
    pub delivered: Mutex<Vec<String>>,
    pub refuse: AtomicBool,
}

#[async_trait]
impl NotificationSender for RecordingSender {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<(), SendError> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(SendError::Rejected("channel closed".to_string()));
        }
        self.delivered
            .lock()
            .unwrap()
            .push(notification.title.clone());
        Ok(())
    }
}

/// Test context containing the app and its storage
pub struct TestContext {
    pub app: Router,
    pub reminders: Arc<InMemoryReminderRepo>,
    pub notifications: Arc<InMemoryNotificationRepo>,
    pub sender: Arc<RecordingSender>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config::load(&|_: &str| None::<String>).unwrap();
        let reminders = Arc::new(InMemoryReminderRepo::new());
        let notifications = Arc::new(InMemoryNotificationRepo::new());
        let sender = Arc::new(RecordingSender::default());

        let state = AppState::new(
            reminders.clone(),
            notifications.clone(),
            sender.clone(),
            config,
        );

        TestContext {
            app: build_router(state),
            reminders,
            notifications,
            sender,
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.sender.delivered.lock().unwrap().clone()
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

    /// Creates a reminder for `task_id` firing at `at` (RFC 3339)
    pub async fn create_reminder(&self, task_id: &str, at: &str) -> Value {
        let (status, json) = self
            .request(
                "POST",
                "/api/v1/reminders",
                Some(serde_json::json!({
                    "task_id": task_id,
                    "title": format!("Reminder: {task_id}"),
                    "message": "Task is due soon",
                    "reminder_time": at
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
        json
    }
}
