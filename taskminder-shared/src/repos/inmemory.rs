/// In-memory repositories
///
/// Collections are `Vec`s behind a `tokio::sync::RwLock`. They honour the
/// same filters, ordering and pagination as the MongoDB repositories and
/// are used by the integration test suites and `DATABASE_BACKEND=memory`.

use super::{NotificationRepo, ReminderRepo, TaskRepo};
use crate::error::RepoResult;
use crate::models::{
    id::DocumentId,
    notification::{Notification, NotificationFilter, NotificationStatus},
    page::Page,
    reminder::{Reminder, ReminderFilter, ReminderUpdate},
    task::{Task, TaskFilter, TaskUpdate},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tokio::sync::RwLock;

/// Anything stored by id
pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> DocumentId;
}

impl Entity for Task {
    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Entity for Reminder {
    fn id(&self) -> DocumentId {
        self.id
    }
}

impl Entity for Notification {
    fn id(&self) -> DocumentId {
        self.id
    }
}

/// A lock-protected list of documents
#[derive(Debug)]
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, item: &T) {
        self.items.write().await.push(item.clone());
    }

    pub async fn find(&self, id: &DocumentId) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == *id)
            .cloned()
    }

    pub async fn find_by<F: Fn(&T) -> bool>(&self, predicate: F) -> Vec<T> {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub async fn count_by<F: Fn(&T) -> bool>(&self, predicate: F) -> u64 {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| predicate(item))
            .count() as u64
    }

    pub async fn save(&self, item: &T) -> bool {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|stored| stored.id() == item.id()) {
            Some(stored) => {
                *stored = item.clone();
                true
            }
            None => false,
        }
    }

    pub async fn delete(&self, id: &DocumentId) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id() != *id);
        items.len() != before
    }

    /// Finds the first item matching `predicate` and mutates it under the
    /// write lock, returning the updated copy
    pub async fn update_first<P, U>(&self, predicate: P, update: U) -> Option<T>
    where
        P: Fn(&T) -> bool,
        U: FnOnce(&mut T),
    {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|item| predicate(item))?;
        update(item);
        Some(item.clone())
    }

    /// Like `update_first`, but picks the match with the smallest `key`
    pub async fn update_min_by_key<P, K, O, U>(&self, predicate: P, key: K, update: U) -> Option<T>
    where
        P: Fn(&T) -> bool,
        K: Fn(&T) -> O,
        O: Ord,
        U: FnOnce(&mut T),
    {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .filter(|item| predicate(item))
            .min_by_key(|item| key(item))?;
        update(item);
        Some(item.clone())
    }

    pub async fn update_by_id<U: FnOnce(&mut T)>(&self, id: &DocumentId, update: U) -> Option<T> {
        self.update_first(|item| item.id() == *id, update).await
    }
}

/// In-memory task repository
#[derive(Debug, Default)]
pub struct InMemoryTaskRepo {
    tasks: Collection<Task>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> RepoResult<()> {
        self.tasks.insert(task).await;
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Task>> {
        Ok(self.tasks.find(id).await)
    }

    async fn find_many(&self, filter: &TaskFilter, page: Page) -> RepoResult<Vec<Task>> {
        let mut tasks = self.tasks.find_by(|t| filter.matches(t)).await;
        tasks.sort_by_key(|t| Reverse(t.created_at));
        Ok(page.slice(tasks))
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &TaskUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Task>> {
        Ok(self
            .tasks
            .update_by_id(id, |t| t.apply(update.clone(), now))
            .await)
    }

    async fn complete(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<Option<Task>> {
        Ok(self.tasks.update_by_id(id, |t| t.mark_completed(now)).await)
    }

    async fn delete(&self, id: &DocumentId) -> RepoResult<bool> {
        Ok(self.tasks.delete(id).await)
    }

    async fn count(&self, filter: &TaskFilter) -> RepoResult<u64> {
        Ok(self.tasks.count_by(|t| filter.matches(t)).await)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// In-memory reminder repository
#[derive(Debug, Default)]
pub struct InMemoryReminderRepo {
    reminders: Collection<Reminder>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> RepoResult<()> {
        self.reminders.insert(reminder).await;
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Reminder>> {
        Ok(self.reminders.find(id).await)
    }

    async fn find_many(&self, filter: &ReminderFilter, page: Page) -> RepoResult<Vec<Reminder>> {
        let mut reminders = self.reminders.find_by(|r| filter.matches(r)).await;
        reminders.sort_by_key(|r| r.reminder_time);
        Ok(page.slice(reminders))
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &ReminderUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Reminder>> {
        Ok(self
            .reminders
            .update_by_id(id, |r| r.apply(update.clone(), now))
            .await)
    }

    async fn delete(&self, id: &DocumentId) -> RepoResult<bool> {
        Ok(self.reminders.delete(id).await)
    }

    async fn count(&self, filter: &ReminderFilter) -> RepoResult<u64> {
        Ok(self.reminders.count_by(|r| filter.matches(r)).await)
    }

    async fn claim_due(&self, now: DateTime<Utc>) -> RepoResult<Option<Reminder>> {
        Ok(self
            .reminders
            .update_min_by_key(
                |r| r.is_due(now),
                |r| r.reminder_time,
                |r| {
                    r.status = NotificationStatus::Sent;
                    r.sent_at = Some(now);
                    r.updated_at = now;
                },
            )
            .await)
    }

    async fn mark_failed(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<bool> {
        Ok(self
            .reminders
            .update_by_id(id, |r| r.mark_failed(now))
            .await
            .is_some())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// In-memory notification repository
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepo {
    notifications: Collection<Notification>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications.insert(notification).await;
        Ok(())
    }

    async fn find_many(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> RepoResult<Vec<Notification>> {
        let mut notifications = self.notifications.find_by(|n| filter.matches(n)).await;
        notifications.sort_by_key(|n| Reverse(n.created_at));
        Ok(page.slice(notifications))
    }

    async fn save(&self, notification: &Notification) -> RepoResult<bool> {
        Ok(self.notifications.save(notification).await)
    }

    async fn count(&self, filter: &NotificationFilter) -> RepoResult<u64> {
        Ok(self.notifications.count_by(|n| filter.matches(n)).await)
    }
}
