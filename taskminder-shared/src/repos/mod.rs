/// Repositories
///
/// Each collection is accessed through an object-safe async trait so the
/// services can run against MongoDB in production and against in-memory
/// collections in tests and local development.
///
/// # Implementations
///
/// - `mongo`: MongoDB collections (`tasks`, `reminders`, `notifications`)
/// - `inmemory`: `tokio::sync::RwLock<Vec<_>>` collections
///
/// # Example
///
/// ```
/// use taskminder_shared::models::task::{Task, TaskCreate};
/// use taskminder_shared::repos::{inmemory::InMemoryTaskRepo, TaskRepo};
/// use chrono::Utc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = InMemoryTaskRepo::new();
/// let task = Task::new(TaskCreate::titled("Water plants"), Utc::now());
/// repo.insert(&task).await?;
/// assert_eq!(repo.find(&task.id).await?, Some(task));
/// # Ok(())
/// # }
/// ```

pub mod inmemory;
pub mod mongo;

use crate::error::RepoResult;
use crate::models::{
    id::DocumentId,
    notification::{Notification, NotificationFilter, NotificationStats, NotificationStatus},
    page::Page,
    reminder::{Reminder, ReminderFilter, ReminderUpdate},
    task::{Task, TaskFilter, TaskStats, TaskStatus, TaskUpdate},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Task collection
#[async_trait]
pub trait TaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> RepoResult<()>;

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Task>>;

    /// Lists matching tasks, newest first
    async fn find_many(&self, filter: &TaskFilter, page: Page) -> RepoResult<Vec<Task>>;

    /// Sets only the fields present in `update` and returns the stored task
    ///
    /// Concurrent updates of different fields never overwrite each other.
    /// Returns `None` if the task does not exist.
    async fn update(
        &self,
        id: &DocumentId,
        update: &TaskUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Task>>;

    /// Marks a task completed, keeping the first `completed_at`
    async fn complete(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<Option<Task>>;

    /// Deletes a task; returns false if it did not exist
    async fn delete(&self, id: &DocumentId) -> RepoResult<bool>;

    async fn count(&self, filter: &TaskFilter) -> RepoResult<u64>;

    /// Checks the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

/// Reminder collection
#[async_trait]
pub trait ReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> RepoResult<()>;

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Reminder>>;

    /// Lists matching reminders, earliest trigger first
    async fn find_many(&self, filter: &ReminderFilter, page: Page) -> RepoResult<Vec<Reminder>>;

    /// Sets only the fields present in `update`; `None` if missing
    async fn update(
        &self,
        id: &DocumentId,
        update: &ReminderUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Reminder>>;

    async fn delete(&self, id: &DocumentId) -> RepoResult<bool>;

    async fn count(&self, filter: &ReminderFilter) -> RepoResult<u64>;

    /// Atomically claims the earliest pending reminder due at `now`
    ///
    /// The claimed reminder is stored as `sent` with `sent_at = now` before
    /// it is returned, so concurrent dispatchers never claim it twice.
    async fn claim_due(&self, now: DateTime<Utc>) -> RepoResult<Option<Reminder>>;

    /// Records a failed delivery of a claimed reminder; false if missing
    async fn mark_failed(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<bool>;

    async fn ping(&self) -> RepoResult<()>;
}

/// Notification history collection
#[async_trait]
pub trait NotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> RepoResult<()>;

    /// Lists matching notifications, newest first
    async fn find_many(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> RepoResult<Vec<Notification>>;

    async fn save(&self, notification: &Notification) -> RepoResult<bool>;

    async fn count(&self, filter: &NotificationFilter) -> RepoResult<u64>;
}

/// Computes the task statistics overview at `now`
pub async fn task_stats(repo: &dyn TaskRepo, now: DateTime<Utc>) -> RepoResult<TaskStats> {
    Ok(TaskStats {
        total_tasks: repo.count(&TaskFilter::default()).await?,
        pending_tasks: repo.count(&TaskFilter::with_status(TaskStatus::Pending)).await?,
        in_progress_tasks: repo
            .count(&TaskFilter::with_status(TaskStatus::InProgress))
            .await?,
        completed_tasks: repo
            .count(&TaskFilter::with_status(TaskStatus::Completed))
            .await?,
        cancelled_tasks: repo
            .count(&TaskFilter::with_status(TaskStatus::Cancelled))
            .await?,
        overdue_tasks: repo.count(&TaskFilter::overdue(now)).await?,
        upcoming_tasks: repo.count(&TaskFilter::upcoming(now)).await?,
    })
}

/// Computes the notification statistics overview at `now`
pub async fn notification_stats(
    reminders: &dyn ReminderRepo,
    notifications: &dyn NotificationRepo,
    now: DateTime<Utc>,
) -> RepoResult<NotificationStats> {
    Ok(NotificationStats {
        total_reminders: reminders.count(&ReminderFilter::default()).await?,
        pending_reminders: reminders
            .count(&ReminderFilter::with_status(NotificationStatus::Pending))
            .await?,
        sent_reminders: reminders
            .count(&ReminderFilter::with_status(NotificationStatus::Sent))
            .await?,
        total_notifications: notifications.count(&NotificationFilter::default()).await?,
        sent_notifications: notifications
            .count(&NotificationFilter::with_status(NotificationStatus::Sent))
            .await?,
        failed_notifications: notifications
            .count(&NotificationFilter::with_status(NotificationStatus::Failed))
            .await?,
        due_soon: reminders.count(&ReminderFilter::due_soon(now)).await?,
    })
}
