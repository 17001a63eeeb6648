/// Reminder model
///
/// A reminder is a scheduled alert tied to a task. When its
/// `reminder_time` passes, the notification service dispatcher delivers it
/// and records a [`Notification`](super::notification::Notification).

use super::id::DocumentId;
use super::notification::NotificationStatus;
use super::page::{default_limit, Page};
use super::to_millis;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reminder document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: DocumentId,

    /// ID of the associated task (soft reference)
    pub task_id: String,

    pub title: String,

    pub message: String,

    /// When to send the reminder
    pub reminder_time: DateTime<Utc>,

    pub task_due_date: Option<DateTime<Utc>>,

    /// Delivery status
    pub status: NotificationStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// When the reminder was delivered
    pub sent_at: Option<DateTime<Utc>>,
}

impl Reminder {
    /// Builds a new pending reminder
    pub fn new(input: ReminderCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::new(),
            task_id: input.task_id,
            title: input.title,
            message: input.message,
            reminder_time: to_millis(input.reminder_time),
            task_due_date: input.task_due_date.map(to_millis),
            status: NotificationStatus::Pending,
            created_at: now,
            updated_at: now,
            sent_at: None,
        }
    }

    /// Applies the fields present in `update`
    pub fn apply(&mut self, update: ReminderUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(message) = update.message {
            self.message = message;
        }
        if let Some(reminder_time) = update.reminder_time {
            self.reminder_time = to_millis(reminder_time);
        }
        if let Some(due) = update.task_due_date {
            self.task_due_date = Some(to_millis(due));
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
    }

    /// Records that delivery of a claimed reminder failed
    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.status = NotificationStatus::Failed;
        self.sent_at = None;
        self.updated_at = now;
    }

    /// Whether the reminder should be dispatched at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == NotificationStatus::Pending && self.reminder_time <= now
    }
}

/// Create reminder request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReminderCreate {
    #[validate(length(min = 1, message = "task_id must not be empty"))]
    pub task_id: String,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "Message must be between 1 and 500 characters"))]
    pub message: String,

    pub reminder_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_due_date: Option<DateTime<Utc>>,
}

/// Update reminder request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReminderUpdate {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Message must be between 1 and 500 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,
}

/// Reminder selection criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderFilter {
    pub status: Option<NotificationStatus>,

    pub task_id: Option<String>,

    /// `reminder_time <= due_by`
    pub due_by: Option<DateTime<Utc>>,
}

impl ReminderFilter {
    pub fn with_status(status: NotificationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Pending reminders firing at or before `at`
    pub fn pending_due_by(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(NotificationStatus::Pending),
            due_by: Some(to_millis(at)),
            ..Default::default()
        }
    }

    /// Pending reminders firing within the next hour
    pub fn due_soon(now: DateTime<Utc>) -> Self {
        Self::pending_due_by(now + Duration::hours(1))
    }

    pub fn matches(&self, reminder: &Reminder) -> bool {
        self.status.map_or(true, |s| s == reminder.status)
            && self
                .task_id
                .as_deref()
                .map_or(true, |id| id == reminder.task_id)
            && self.due_by.map_or(true, |at| reminder.reminder_time <= at)
    }
}

/// Query string of `GET /reminders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReminderQuery {
    #[serde(default)]
    pub skip: u64,

    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl Default for ReminderQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            status: None,
            task_id: None,
        }
    }
}

impl ReminderQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    pub fn filter(&self) -> ReminderFilter {
        ReminderFilter {
            status: self.status,
            task_id: self.task_id.clone(),
            due_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create(at: DateTime<Utc>) -> ReminderCreate {
        ReminderCreate {
            task_id: "60f7b0c5d5f8a7b3c8e9f1a2".into(),
            title: "Reminder: docs".into(),
            message: "Task 'docs' is due soon".into(),
            reminder_time: at,
            task_due_date: None,
        }
    }

    #[test]
    fn test_new_reminder_is_pending_and_due_after_trigger() {
        let trigger = Utc.with_ymd_and_hms(2024, 12, 30, 9, 0, 0).unwrap();
        let reminder = Reminder::new(create(trigger), trigger - Duration::days(1));

        assert_eq!(reminder.status, NotificationStatus::Pending);
        assert!(!reminder.is_due(trigger - Duration::minutes(1)));
        assert!(reminder.is_due(trigger));
    }

    #[test]
    fn test_sent_reminder_is_never_due() {
        let trigger = Utc.with_ymd_and_hms(2024, 12, 30, 9, 0, 0).unwrap();
        let mut reminder = Reminder::new(create(trigger), trigger);
        reminder.apply(
            ReminderUpdate {
                status: Some(NotificationStatus::Sent),
                ..Default::default()
            },
            trigger,
        );
        assert!(!reminder.is_due(trigger + Duration::hours(1)));
    }

    #[test]
    fn test_filter_by_task_and_window() {
        let now = Utc.with_ymd_and_hms(2024, 12, 30, 9, 0, 0).unwrap();
        let reminder = Reminder::new(create(now + Duration::minutes(30)), now);

        assert!(ReminderFilter::due_soon(now).matches(&reminder));
        assert!(!ReminderFilter::pending_due_by(now).matches(&reminder));

        let other_task = ReminderFilter {
            task_id: Some("someone-else".into()),
            ..Default::default()
        };
        assert!(!other_task.matches(&reminder));
    }

    #[test]
    fn test_create_validation_rejects_empty_fields() {
        let now = Utc::now();
        let mut input = create(now);
        assert!(input.validate().is_ok());

        input.message = String::new();
        assert!(input.validate().is_err());

        let mut input = create(now);
        input.task_id = String::new();
        assert!(input.validate().is_err());
    }
}
