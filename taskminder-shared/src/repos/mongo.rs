/// MongoDB repositories
///
/// Domain models are mapped to `*Document` structs that carry the BSON
/// layout: `_id` is an ObjectId and timestamps are BSON datetimes so range
/// queries (`$lt`, `$lte`) compare correctly.
///
/// # Collections
///
/// | repository | collection |
/// |---|---|
/// | `MongoTaskRepo` | `tasks` |
/// | `MongoReminderRepo` | `reminders` |
/// | `MongoNotificationRepo` | `notifications` |

use super::{NotificationRepo, ReminderRepo, TaskRepo};
use crate::error::RepoResult;
use crate::models::{
    id::DocumentId,
    notification::{Notification, NotificationFilter, NotificationStatus, NotificationType},
    page::Page,
    reminder::{Reminder, ReminderFilter, ReminderUpdate},
    task::{Task, TaskFilter, TaskPriority, TaskStatus, TaskUpdate},
    to_millis,
};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub const TASKS_COLLECTION: &str = "tasks";
pub const REMINDERS_COLLECTION: &str = "reminders";
pub const NOTIFICATIONS_COLLECTION: &str = "notifications";

fn to_bson_time(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_chrono(dt)
}

fn to_bson_time_opt(dt: Option<DateTime<Utc>>) -> Option<BsonDateTime> {
    dt.map(BsonDateTime::from_chrono)
}

fn id_filter(id: &DocumentId) -> Document {
    doc! { "_id": id.as_object_id() }
}

fn return_updated() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

fn find_options(page: Page, sort: Document) -> FindOptions {
    FindOptions::builder()
        .sort(sort)
        .skip(page.skip)
        .limit(page.limit as i64)
        .build()
}

async fn ping(db: &Database) -> RepoResult<()> {
    db.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    category: Option<String>,
    due_date: Option<BsonDateTime>,
    reminder_enabled: bool,
    reminder_time: Option<BsonDateTime>,
    status: TaskStatus,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
    completed_at: Option<BsonDateTime>,
}

impl TaskDocument {
    fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id.as_object_id(),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            category: task.category.clone(),
            due_date: to_bson_time_opt(task.due_date),
            reminder_enabled: task.reminder_enabled,
            reminder_time: to_bson_time_opt(task.reminder_time),
            status: task.status,
            created_at: to_bson_time(task.created_at),
            updated_at: to_bson_time(task.updated_at),
            completed_at: to_bson_time_opt(task.completed_at),
        }
    }

    fn into_domain(self) -> Task {
        Task {
            id: self.id.into(),
            title: self.title,
            description: self.description,
            priority: self.priority,
            category: self.category,
            due_date: self.due_date.map(|d| d.to_chrono()),
            reminder_enabled: self.reminder_enabled,
            reminder_time: self.reminder_time.map(|d| d.to_chrono()),
            status: self.status,
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
            completed_at: self.completed_at.map(|d| d.to_chrono()),
        }
    }
}

/// Renders a task filter as a MongoDB query document
pub fn task_filter_document(filter: &TaskFilter) -> Document {
    let mut query = Document::new();

    let mut status = Document::new();
    if let Some(s) = filter.status {
        status.insert("$eq", s.as_str());
    }
    if let Some(s) = filter.exclude_status {
        status.insert("$ne", s.as_str());
    }
    if !status.is_empty() {
        query.insert("status", status);
    }

    if let Some(priority) = filter.priority {
        query.insert("priority", priority.as_str());
    }
    if let Some(category) = &filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(search) = &filter.search {
        let pattern = regex::escape(search);
        query.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }

    let mut due = Document::new();
    if let Some(bound) = filter.due_before {
        due.insert("$lt", to_bson_time(bound));
    }
    if let Some(bound) = filter.due_from {
        due.insert("$gte", to_bson_time(bound));
    }
    if let Some(bound) = filter.due_until {
        due.insert("$lte", to_bson_time(bound));
    }
    if !due.is_empty() {
        query.insert("due_date", due);
    }

    query
}

/// Renders the `$set` fields of a task update
///
/// Only fields present in `update` are set, plus `updated_at`. Stamping
/// `completed_at` is left to the caller since it depends on stored state.
pub fn task_update_document(update: &TaskUpdate, now: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &update.description {
        set.insert("description", description.as_str());
    }
    if let Some(priority) = update.priority {
        set.insert("priority", priority.as_str());
    }
    if let Some(category) = &update.category {
        set.insert("category", category.as_str());
    }
    if let Some(due_date) = update.due_date {
        set.insert("due_date", to_bson_time(to_millis(due_date)));
    }
    if let Some(enabled) = update.reminder_enabled {
        set.insert("reminder_enabled", enabled);
    }
    if let Some(reminder_time) = update.reminder_time {
        set.insert("reminder_time", to_bson_time(to_millis(reminder_time)));
    }
    if let Some(status) = update.status {
        set.insert("status", status.as_str());
    }
    set.insert("updated_at", to_bson_time(now));
    set
}

/// MongoDB task repository
#[derive(Clone)]
pub struct MongoTaskRepo {
    db: Database,
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(TASKS_COLLECTION),
        }
    }

    /// Applies `$set`, stamping `completed_at` if the task has none yet
    ///
    /// The first attempt only matches a task without `completed_at`; when it
    /// misses, the task is either missing or already stamped, and the plain
    /// `$set` settles which.
    async fn set_fields(
        &self,
        id: &DocumentId,
        set: Document,
        completes: bool,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Task>> {
        if completes {
            let mut first_completion = id_filter(id);
            first_completion.insert("completed_at", Bson::Null);
            let mut stamped = set.clone();
            stamped.insert("completed_at", to_bson_time(now));

            let found = self
                .collection
                .find_one_and_update(first_completion, doc! { "$set": stamped }, return_updated())
                .await?;
            if let Some(found) = found {
                return Ok(Some(found.into_domain()));
            }
        }

        let found = self
            .collection
            .find_one_and_update(id_filter(id), doc! { "$set": set }, return_updated())
            .await?;
        Ok(found.map(TaskDocument::into_domain))
    }
}

#[async_trait]
impl TaskRepo for MongoTaskRepo {
    async fn insert(&self, task: &Task) -> RepoResult<()> {
        self.collection
            .insert_one(TaskDocument::from_domain(task), None)
            .await?;
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Task>> {
        let found = self.collection.find_one(id_filter(id), None).await?;
        Ok(found.map(TaskDocument::into_domain))
    }

    async fn find_many(&self, filter: &TaskFilter, page: Page) -> RepoResult<Vec<Task>> {
        let cursor = self
            .collection
            .find(
                task_filter_document(filter),
                find_options(page, doc! { "created_at": -1 }),
            )
            .await?;
        let docs: Vec<TaskDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(TaskDocument::into_domain).collect())
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &TaskUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Task>> {
        let completes = update.status == Some(TaskStatus::Completed);
        self.set_fields(id, task_update_document(update, now), completes, now)
            .await
    }

    async fn complete(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<Option<Task>> {
        let set = doc! {
            "status": TaskStatus::Completed.as_str(),
            "updated_at": to_bson_time(now),
        };
        self.set_fields(id, set, true, now).await
    }

    async fn delete(&self, id: &DocumentId) -> RepoResult<bool> {
        let result = self.collection.delete_one(id_filter(id), None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, filter: &TaskFilter) -> RepoResult<u64> {
        Ok(self
            .collection
            .count_documents(task_filter_document(filter), None)
            .await?)
    }

    async fn ping(&self) -> RepoResult<()> {
        ping(&self.db).await
    }
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct ReminderDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    task_id: String,
    title: String,
    message: String,
    reminder_time: BsonDateTime,
    task_due_date: Option<BsonDateTime>,
    status: NotificationStatus,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
    sent_at: Option<BsonDateTime>,
}

impl ReminderDocument {
    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id.as_object_id(),
            task_id: reminder.task_id.clone(),
            title: reminder.title.clone(),
            message: reminder.message.clone(),
            reminder_time: to_bson_time(reminder.reminder_time),
            task_due_date: to_bson_time_opt(reminder.task_due_date),
            status: reminder.status,
            created_at: to_bson_time(reminder.created_at),
            updated_at: to_bson_time(reminder.updated_at),
            sent_at: to_bson_time_opt(reminder.sent_at),
        }
    }

    fn into_domain(self) -> Reminder {
        Reminder {
            id: self.id.into(),
            task_id: self.task_id,
            title: self.title,
            message: self.message,
            reminder_time: self.reminder_time.to_chrono(),
            task_due_date: self.task_due_date.map(|d| d.to_chrono()),
            status: self.status,
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
            sent_at: self.sent_at.map(|d| d.to_chrono()),
        }
    }
}

/// Renders a reminder filter as a MongoDB query document
pub fn reminder_filter_document(filter: &ReminderFilter) -> Document {
    let mut query = Document::new();
    if let Some(status) = filter.status {
        query.insert("status", status.as_str());
    }
    if let Some(task_id) = &filter.task_id {
        query.insert("task_id", task_id.as_str());
    }
    if let Some(at) = filter.due_by {
        query.insert("reminder_time", doc! { "$lte": to_bson_time(at) });
    }
    query
}

/// Renders the `$set` fields of a reminder update, plus `updated_at`
pub fn reminder_update_document(update: &ReminderUpdate, now: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(message) = &update.message {
        set.insert("message", message.as_str());
    }
    if let Some(reminder_time) = update.reminder_time {
        set.insert("reminder_time", to_bson_time(to_millis(reminder_time)));
    }
    if let Some(due) = update.task_due_date {
        set.insert("task_due_date", to_bson_time(to_millis(due)));
    }
    if let Some(status) = update.status {
        set.insert("status", status.as_str());
    }
    set.insert("updated_at", to_bson_time(now));
    set
}

/// MongoDB reminder repository
#[derive(Clone)]
pub struct MongoReminderRepo {
    db: Database,
    collection: Collection<ReminderDocument>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(REMINDERS_COLLECTION),
        }
    }
}

#[async_trait]
impl ReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> RepoResult<()> {
        self.collection
            .insert_one(ReminderDocument::from_domain(reminder), None)
            .await?;
        Ok(())
    }

    async fn find(&self, id: &DocumentId) -> RepoResult<Option<Reminder>> {
        let found = self.collection.find_one(id_filter(id), None).await?;
        Ok(found.map(ReminderDocument::into_domain))
    }

    async fn find_many(&self, filter: &ReminderFilter, page: Page) -> RepoResult<Vec<Reminder>> {
        let cursor = self
            .collection
            .find(
                reminder_filter_document(filter),
                find_options(page, doc! { "reminder_time": 1 }),
            )
            .await?;
        let docs: Vec<ReminderDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(ReminderDocument::into_domain).collect())
    }

    async fn update(
        &self,
        id: &DocumentId,
        update: &ReminderUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<Reminder>> {
        let found = self
            .collection
            .find_one_and_update(
                id_filter(id),
                doc! { "$set": reminder_update_document(update, now) },
                return_updated(),
            )
            .await?;
        Ok(found.map(ReminderDocument::into_domain))
    }

    async fn delete(&self, id: &DocumentId) -> RepoResult<bool> {
        let result = self.collection.delete_one(id_filter(id), None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, filter: &ReminderFilter) -> RepoResult<u64> {
        Ok(self
            .collection
            .count_documents(reminder_filter_document(filter), None)
            .await?)
    }

    async fn claim_due(&self, now: DateTime<Utc>) -> RepoResult<Option<Reminder>> {
        let at = to_bson_time(now);
        let options = FindOneAndUpdateOptions::builder()
            .sort(doc! { "reminder_time": 1 })
            .return_document(ReturnDocument::After)
            .build();
        let claimed = self
            .collection
            .find_one_and_update(
                reminder_filter_document(&ReminderFilter::pending_due_by(now)),
                doc! {
                    "$set": {
                        "status": NotificationStatus::Sent.as_str(),
                        "sent_at": at,
                        "updated_at": at,
                    }
                },
                options,
            )
            .await?;
        Ok(claimed.map(ReminderDocument::into_domain))
    }

    async fn mark_failed(&self, id: &DocumentId, now: DateTime<Utc>) -> RepoResult<bool> {
        let result = self
            .collection
            .update_one(
                id_filter(id),
                doc! {
                    "$set": {
                        "status": NotificationStatus::Failed.as_str(),
                        "sent_at": Bson::Null,
                        "updated_at": to_bson_time(now),
                    }
                },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn ping(&self) -> RepoResult<()> {
        ping(&self.db).await
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct NotificationDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    task_id: String,
    title: String,
    message: String,
    notification_type: NotificationType,
    status: NotificationStatus,
    created_at: BsonDateTime,
    sent_at: Option<BsonDateTime>,
    error_message: Option<String>,
}

impl NotificationDocument {
    fn from_domain(notification: &Notification) -> Self {
        Self {
            id: notification.id.as_object_id(),
            task_id: notification.task_id.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            notification_type: notification.notification_type,
            status: notification.status,
            created_at: to_bson_time(notification.created_at),
            sent_at: to_bson_time_opt(notification.sent_at),
            error_message: notification.error_message.clone(),
        }
    }

    fn into_domain(self) -> Notification {
        Notification {
            id: self.id.into(),
            task_id: self.task_id,
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
            status: self.status,
            created_at: self.created_at.to_chrono(),
            sent_at: self.sent_at.map(|d| d.to_chrono()),
            error_message: self.error_message,
        }
    }
}

/// Renders a notification filter as a MongoDB query document
pub fn notification_filter_document(filter: &NotificationFilter) -> Document {
    let mut query = Document::new();
    if let Some(status) = filter.status {
        query.insert("status", status.as_str());
    }
    if let Some(kind) = filter.notification_type {
        query.insert("notification_type", kind.as_str());
    }
    if let Some(task_id) = &filter.task_id {
        query.insert("task_id", task_id.as_str());
    }
    query
}

/// MongoDB notification repository
#[derive(Clone)]
pub struct MongoNotificationRepo {
    collection: Collection<NotificationDocument>,
}

impl MongoNotificationRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(NOTIFICATIONS_COLLECTION),
        }
    }
}

#[async_trait]
impl NotificationRepo for MongoNotificationRepo {
    async fn insert(&self, notification: &Notification) -> RepoResult<()> {
        self.collection
            .insert_one(NotificationDocument::from_domain(notification), None)
            .await?;
        Ok(())
    }

    async fn find_many(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> RepoResult<Vec<Notification>> {
        let cursor = self
            .collection
            .find(
                notification_filter_document(filter),
                find_options(page, doc! { "created_at": -1 }),
            )
            .await?;
        let docs: Vec<NotificationDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(NotificationDocument::into_domain).collect())
    }

    async fn save(&self, notification: &Notification) -> RepoResult<bool> {
        let result = self
            .collection
            .replace_one(
                id_filter(&notification.id),
                NotificationDocument::from_domain(notification),
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn count(&self, filter: &NotificationFilter) -> RepoResult<u64> {
        Ok(self
            .collection
            .count_documents(notification_filter_document(filter), None)
            .await?)
    }
}
