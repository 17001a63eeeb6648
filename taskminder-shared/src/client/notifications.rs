/// Notification service client

use super::{BaseClient, ClientResult};
use crate::http::health::HealthResponse;
use crate::models::{
    notification::{Notification, NotificationQuery, NotificationStats},
    reminder::{Reminder, ReminderCreate, ReminderQuery},
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotificationServiceClient {
    base: BaseClient,
}

impl NotificationServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            base: BaseClient::new(base_url, timeout)?,
        })
    }

    pub async fn create_reminder(&self, reminder: &ReminderCreate) -> ClientResult<Reminder> {
        self.base.post("reminders", reminder).await
    }

    pub async fn list_reminders(&self, query: &ReminderQuery) -> ClientResult<Vec<Reminder>> {
        self.base.get_with_query("reminders", query).await
    }

    pub async fn history(&self, query: &NotificationQuery) -> ClientResult<Vec<Notification>> {
        self.base.get_with_query("notifications/history", query).await
    }

    pub async fn stats(&self) -> ClientResult<NotificationStats> {
        self.base.get("stats/overview").await
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.base.health().await
    }
}
