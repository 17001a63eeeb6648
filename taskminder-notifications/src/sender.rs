/// Notification delivery
///
/// Delivery channels implement `NotificationSender`. The service ships with
/// `LogSender`, which records the delivery through `tracing`; email, SMS or
/// push channels plug in behind the same trait.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use taskminder_notifications::sender::{NotificationSender, SendError};
/// use taskminder_shared::models::notification::Notification;
///
/// struct Outbox;
///
/// #[async_trait]
/// impl NotificationSender for Outbox {
///     fn name(&self) -> &str {
///         "outbox"
///     }
///
///     async fn send(&self, notification: &Notification) -> Result<(), SendError> {
///         if notification.message.is_empty() {
///             return Err(SendError::Rejected("empty message".into()));
///         }
///         Ok(())
///     }
/// }
/// ```

use async_trait::async_trait;
use taskminder_shared::models::notification::Notification;
use tracing::info;

/// Delivery error
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The channel could not be reached
    #[error("channel unavailable: {0}")]
    Unavailable(String),

    /// The channel refused the notification
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// A delivery channel
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Channel name, used in logs
    fn name(&self) -> &str;

    /// Delivers one notification
    async fn send(&self, notification: &Notification) -> Result<(), SendError>;
}

/// Writes each notification to the service log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<(), SendError> {
        info!(
            notification_id = %notification.id,
            task_id = %notification.task_id,
            notification_type = notification.notification_type.as_str(),
            title = %notification.title,
            "Sending notification: {}",
            notification.message
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskminder_shared::models::notification::{NotificationCreate, NotificationType};

    #[tokio::test]
    async fn test_log_sender_always_delivers() {
        let notification = Notification::new(
            NotificationCreate {
                task_id: "t1".into(),
                title: "Heads up".into(),
                message: "Due tomorrow".into(),
                notification_type: NotificationType::DueDate,
            },
            Utc::now(),
        );
        assert_eq!(LogSender.name(), "log");
        assert!(LogSender.send(&notification).await.is_ok());
    }
}
