/// Due-reminder dispatcher
///
/// Turns pending reminders whose `reminder_time` has passed into
/// `reminder` notifications.
///
/// ```text
/// loop
///   ├─> ReminderRepo::claim_due      pending → sent, atomically
///   ├─> NotificationSender::send
///   ├─> NotificationRepo::insert     sent, or failed with error_message
///   └─> on failure: reminder → failed
/// ```
///
/// Claiming is atomic in storage, so any number of replicas may sweep at
/// the same time without delivering a reminder twice. The sweep runs on a
/// fixed interval from `ReminderDispatcher::run` and on demand from
/// `GET /api/v1/reminders/due/check`.

use crate::sender::NotificationSender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use taskminder_shared::{
    error::RepoResult,
    models::{notification::Notification, reminder::Reminder, timestamp_now},
    repos::{NotificationRepo, ReminderRepo},
};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Reminders claimed
    pub processed: usize,

    pub sent: usize,

    pub failed: usize,
}

/// Delivers every reminder due at `now`
///
/// # Errors
///
/// Stops at the first storage error; reminders already handled stay handled.
pub async fn dispatch_due(
    reminders: &dyn ReminderRepo,
    notifications: &dyn NotificationRepo,
    sender: &dyn NotificationSender,
    now: DateTime<Utc>,
) -> RepoResult<DispatchReport> {
    let mut report = DispatchReport::default();

    while let Some(reminder) = reminders.claim_due(now).await? {
        report.processed += 1;
        if deliver(reminders, notifications, sender, reminder, now).await? {
            report.sent += 1;
        } else {
            report.failed += 1;
        }
    }

    Ok(report)
}

async fn deliver(
    reminders: &dyn ReminderRepo,
    notifications: &dyn NotificationRepo,
    sender: &dyn NotificationSender,
    reminder: Reminder,
    now: DateTime<Utc>,
) -> RepoResult<bool> {
    let mut notification = Notification::for_reminder(&reminder, now);

    let delivered = match sender.send(&notification).await {
        Ok(()) => {
            notification.mark_sent(now);
            debug!(reminder_id = %reminder.id, channel = sender.name(), "Reminder delivered");
            true
        }
        Err(e) => {
            warn!(
                reminder_id = %reminder.id,
                channel = sender.name(),
                error = %e,
                "Reminder delivery failed"
            );
            notification.mark_failed(e.to_string());
            reminders.mark_failed(&reminder.id, now).await?;
            false
        }
    };

    notifications.insert(&notification).await?;
    Ok(delivered)
}

/// Background loop sweeping due reminders on a fixed interval
pub struct ReminderDispatcher {
    reminders: Arc<dyn ReminderRepo>,
    notifications: Arc<dyn NotificationRepo>,
    sender: Arc<dyn NotificationSender>,
    interval: Duration,
    shutdown_token: CancellationToken,
}

impl ReminderDispatcher {
    pub fn new(
        reminders: Arc<dyn ReminderRepo>,
        notifications: Arc<dyn NotificationRepo>,
        sender: Arc<dyn NotificationSender>,
        interval: Duration,
    ) -> Self {
        Self {
            reminders,
            notifications,
            sender,
            interval,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Replaces the shutdown token, e.g. with the server's
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown_token = token;
        self
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs sweeps until the shutdown token is cancelled
    ///
    /// Storage errors are logged and retried on the next tick.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "Reminder dispatcher starting");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                _ = ticker.tick() => self.sweep().await,
            }
        }

        info!("Reminder dispatcher shut down");
    }

    async fn sweep(&self) {
        match dispatch_due(
            self.reminders.as_ref(),
            self.notifications.as_ref(),
            self.sender.as_ref(),
            timestamp_now(),
        )
        .await
        {
            Ok(report) if report.processed > 0 => info!(
                processed = report.processed,
                sent = report.sent,
                failed = report.failed,
                "Dispatched due reminders"
            ),
            Ok(_) => debug!("No due reminders"),
            Err(e) => error!(error = %e, "Reminder sweep failed"),
        }
    }
}
