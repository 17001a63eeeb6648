/// Notification model
///
/// A notification is a delivered (or failed) alert. Notifications are
/// produced from due reminders or sent directly through
/// `POST /notifications/send`, and form the notification history.

use super::id::DocumentId;
use super::page::{default_limit, Page};
use super::reminder::Reminder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery status shared by reminders and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Pending,
    Sent,
    Failed,
    Cancelled,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
            NotificationStatus::Cancelled => "cancelled",
        }
    }
}

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[default]
    Reminder,
    DueDate,
    Overdue,
    Completion,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Reminder => "reminder",
            NotificationType::DueDate => "due_date",
            NotificationType::Overdue => "overdue",
            NotificationType::Completion => "completion",
        }
    }
}

/// Notification document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: DocumentId,
    pub task_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,

    /// Delivery failure reason
    pub error_message: Option<String>,
}

impl Notification {
    /// Builds a new pending notification
    pub fn new(input: NotificationCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::new(),
            task_id: input.task_id,
            title: input.title,
            message: input.message,
            notification_type: input.notification_type,
            status: NotificationStatus::Pending,
            created_at: now,
            sent_at: None,
            error_message: None,
        }
    }

    /// Builds the notification announcing a due reminder
    pub fn for_reminder(reminder: &Reminder, now: DateTime<Utc>) -> Self {
        Self::new(
            NotificationCreate {
                task_id: reminder.task_id.clone(),
                title: reminder.title.clone(),
                message: reminder.message.clone(),
                notification_type: NotificationType::Reminder,
            },
            now,
        )
    }

    pub fn mark_sent(&mut self, now: DateTime<Utc>) {
        self.status = NotificationStatus::Sent;
        self.sent_at = Some(now);
        self.error_message = None;
    }

    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = NotificationStatus::Failed;
        self.error_message = Some(reason.into());
    }
}

/// Send notification request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotificationCreate {
    #[validate(length(min = 1, message = "task_id must not be empty"))]
    pub task_id: String,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "Message must be between 1 and 500 characters"))]
    pub message: String,

    #[serde(default)]
    pub notification_type: NotificationType,
}

/// Notification selection criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub status: Option<NotificationStatus>,
    pub notification_type: Option<NotificationType>,
    pub task_id: Option<String>,
}

impl NotificationFilter {
    pub fn with_status(status: NotificationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        self.status.map_or(true, |s| s == notification.status)
            && self
                .notification_type
                .map_or(true, |t| t == notification.notification_type)
            && self
                .task_id
                .as_deref()
                .map_or(true, |id| id == notification.task_id)
    }
}

/// Query string of `GET /notifications/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NotificationQuery {
    #[serde(default)]
    pub skip: u64,

    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            status: None,
            notification_type: None,
            task_id: None,
        }
    }
}

impl NotificationQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    pub fn filter(&self) -> NotificationFilter {
        NotificationFilter {
            status: self.status,
            notification_type: self.notification_type,
            task_id: self.task_id.clone(),
        }
    }
}

/// Notification service statistics overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total_reminders: u64,
    pub pending_reminders: u64,
    pub sent_reminders: u64,
    pub total_notifications: u64,
    pub sent_notifications: u64,
    pub failed_notifications: u64,

    /// Pending reminders due within the next hour
    pub due_soon: u64,
}
