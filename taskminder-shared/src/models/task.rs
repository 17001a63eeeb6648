/// Task model
///
/// A task is a user-created to-do item. Tasks live in the `tasks` collection
/// of the task service database.
///
/// # Status
///
/// ```text
/// pending ⇄ in_progress → completed
///        ↘ cancelled
/// ```
///
/// Status is a plain flag: any status can be set through an update, and
/// `PATCH /tasks/{id}/complete` forces `completed`.
///
/// # Example
///
/// ```
/// use taskminder_shared::models::task::{Task, TaskCreate, TaskStatus, TaskUpdate};
/// use chrono::Utc;
///
/// let mut task = Task::new(TaskCreate::titled("Write docs"), Utc::now());
/// assert_eq!(task.status, TaskStatus::Pending);
///
/// let update = TaskUpdate { title: Some("Write better docs".into()), ..Default::default() };
/// task.apply(update, Utc::now());
/// assert_eq!(task.title, "Write better docs");
/// ```

use super::id::DocumentId;
use super::page::{default_limit, Page};
use super::to_millis;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How urgent a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// All priorities, lowest first
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

/// Task status flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not started
    #[default]
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,

    /// Abandoned
    Cancelled,
}

impl TaskStatus {
    /// All statuses in display order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Converts status to the string stored in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

/// Task document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: DocumentId,

    /// Short title (1-200 characters)
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Priority
    pub priority: TaskPriority,

    /// Free-form category such as "work"
    pub category: Option<String>,

    /// When the task is due
    pub due_date: Option<DateTime<Utc>>,

    /// Whether a reminder should be scheduled for this task
    pub reminder_enabled: bool,

    /// When the reminder should fire
    pub reminder_time: Option<DateTime<Utc>>,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,

    /// When the task was first marked completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds a new pending task from a create request
    pub fn new(input: TaskCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: DocumentId::new(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            category: input.category,
            due_date: input.due_date.map(to_millis),
            reminder_enabled: input.reminder_enabled,
            reminder_time: input.reminder_time.map(to_millis),
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Applies the fields present in `update`, leaving all others untouched
    pub fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(to_millis(due_date));
        }
        if let Some(enabled) = update.reminder_enabled {
            self.reminder_enabled = enabled;
        }
        if let Some(reminder_time) = update.reminder_time {
            self.reminder_time = Some(to_millis(reminder_time));
        }
        if let Some(status) = update.status {
            if status == TaskStatus::Completed && self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
            self.status = status;
        }
        self.updated_at = now;
    }

    /// Marks the task completed
    ///
    /// Completing an already completed task keeps the original
    /// `completed_at` and only refreshes `updated_at`.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Returns the reminder instant if a reminder should be scheduled
    pub fn scheduled_reminder(&self) -> Option<DateTime<Utc>> {
        if self.reminder_enabled {
            self.reminder_time
        } else {
            None
        }
    }
}

/// Create task request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: TaskPriority,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub reminder_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
}

impl TaskCreate {
    /// Create request with only a title set
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            category: None,
            due_date: None,
            reminder_enabled: false,
            reminder_time: None,
        }
    }
}

/// Update task request
///
/// Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Whether the update touches reminder settings
    pub fn touches_reminder(&self) -> bool {
        self.reminder_enabled.is_some() || self.reminder_time.is_some()
    }
}

/// Task selection criteria shared by listing and counting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,

    /// Excludes tasks in this status
    pub exclude_status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    pub category: Option<String>,

    /// Case-insensitive substring of title or description
    pub search: Option<String>,

    /// `due_date < due_before`
    pub due_before: Option<DateTime<Utc>>,

    /// `due_date >= due_from`
    pub due_from: Option<DateTime<Utc>>,

    /// `due_date <= due_until`
    pub due_until: Option<DateTime<Utc>>,
}

/// Days ahead a due date counts as upcoming
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

impl TaskFilter {
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Not completed and due before `now`
    pub fn overdue(now: DateTime<Utc>) -> Self {
        Self {
            exclude_status: Some(TaskStatus::Completed),
            due_before: Some(to_millis(now)),
            ..Default::default()
        }
    }

    /// Not completed and due within the next seven days
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        Self {
            exclude_status: Some(TaskStatus::Completed),
            due_from: Some(to_millis(now)),
            due_until: Some(to_millis(now + Duration::days(UPCOMING_WINDOW_DAYS))),
            ..Default::default()
        }
    }

    /// Evaluates the filter against a task
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.exclude_status.is_some_and(|s| s == task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if let Some(category) = &self.category {
            if task.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        let has_due_bounds =
            self.due_before.is_some() || self.due_from.is_some() || self.due_until.is_some();
        if has_due_bounds {
            let Some(due) = task.due_date else {
                return false;
            };
            if self.due_before.is_some_and(|bound| due >= bound) {
                return false;
            }
            if self.due_from.is_some_and(|bound| due < bound) {
                return false;
            }
            if self.due_until.is_some_and(|bound| due > bound) {
                return false;
            }
        }

        true
    }
}

/// Query string of `GET /tasks`
///
/// Serialized by the service clients and deserialized by the task service,
/// so both sides agree on parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskQuery {
    #[serde(default)]
    pub skip: u64,

    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default = "default_limit")]
    pub limit: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            status: None,
            priority: None,
            category: None,
            search: None,
        }
    }
}

impl TaskQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit,
        }
    }

    /// Blank `category` and `search` values are ignored
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
            category: non_blank(&self.category),
            search: non_blank(&self.search),
            ..Default::default()
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Task statistics overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total_tasks: u64,
    pub pending_tasks: u64,
    pub in_progress_tasks: u64,
    pub completed_tasks: u64,
    pub cancelled_tasks: u64,
    pub overdue_tasks: u64,
    pub upcoming_tasks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 30, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new(TaskCreate::titled("Buy milk"), at(9));
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.created_at, task.updated_at);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_apply_changes_only_supplied_fields() {
        let mut create = TaskCreate::titled("Buy milk");
        create.description = Some("Semi-skimmed".into());
        create.category = Some("errands".into());
        let mut task = Task::new(create, at(9));

        task.apply(
            TaskUpdate {
                priority: Some(TaskPriority::High),
                ..Default::default()
            },
            at(10),
        );

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("Semi-skimmed"));
        assert_eq!(task.category.as_deref(), Some("errands"));
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.updated_at, at(10));
        assert_eq!(task.created_at, at(9));
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut task = Task::new(TaskCreate::titled("Ship release"), at(9));
        task.mark_completed(at(10));
        task.mark_completed(at(11));

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(at(10)));
        assert_eq!(task.updated_at, at(11));
    }

    #[test]
    fn test_status_update_to_completed_sets_completed_at() {
        let mut task = Task::new(TaskCreate::titled("Ship release"), at(9));
        task.apply(
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
            at(12),
        );
        assert_eq!(task.completed_at, Some(at(12)));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let mut create = TaskCreate::titled("Quarterly report");
        create.description = Some("Collect FIGURES from finance".into());
        let task = Task::new(create, at(9));

        let by_title = TaskFilter {
            search: Some("REPORT".into()),
            ..Default::default()
        };
        let by_description = TaskFilter {
            search: Some("figures".into()),
            ..Default::default()
        };
        let miss = TaskFilter {
            search: Some("holiday".into()),
            ..Default::default()
        };

        assert!(by_title.matches(&task));
        assert!(by_description.matches(&task));
        assert!(!miss.matches(&task));
    }

    #[test]
    fn test_overdue_and_upcoming_filters() {
        let now = at(12);

        let mut late = TaskCreate::titled("late");
        late.due_date = Some(at(8));
        let late = Task::new(late, at(7));

        let mut soon = TaskCreate::titled("soon");
        soon.due_date = Some(now + Duration::days(2));
        let soon = Task::new(soon, at(7));

        let undated = Task::new(TaskCreate::titled("undated"), at(7));

        let mut done = late.clone();
        done.mark_completed(at(9));

        assert!(TaskFilter::overdue(now).matches(&late));
        assert!(!TaskFilter::overdue(now).matches(&soon));
        assert!(!TaskFilter::overdue(now).matches(&undated));
        assert!(!TaskFilter::overdue(now).matches(&done));

        assert!(TaskFilter::upcoming(now).matches(&soon));
        assert!(!TaskFilter::upcoming(now).matches(&late));
    }

    #[test]
    fn test_client_timestamps_keep_millisecond_precision() {
        let precise = at(9) + Duration::microseconds(123_456);
        let mut input = TaskCreate::titled("precise");
        input.due_date = Some(precise);
        input.reminder_time = Some(precise);

        let mut task = Task::new(input, at(8));
        assert_eq!(task.due_date, Some(at(9) + Duration::milliseconds(123)));
        assert_eq!(task.reminder_time, task.due_date);

        task.apply(
            TaskUpdate {
                due_date: Some(precise + Duration::hours(1)),
                ..Default::default()
            },
            at(8),
        );
        assert_eq!(task.due_date, Some(at(10) + Duration::milliseconds(123)));
    }

    #[test]
    fn test_create_validation() {
        assert!(TaskCreate::titled("ok").validate().is_ok());
        assert!(TaskCreate::titled("").validate().is_err());
        assert!(TaskCreate::titled("x".repeat(201)).validate().is_err());

        let mut long_category = TaskCreate::titled("ok");
        long_category.category = Some("c".repeat(101));
        assert!(long_category.validate().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
        for status in TaskStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
        }
        for priority in TaskPriority::ALL {
            let json = serde_json::to_value(priority).unwrap();
            assert_eq!(json, serde_json::json!(priority.as_str()));
        }
    }

    #[test]
    fn test_query_builds_filter_and_page() {
        let query: TaskQuery =
            serde_json::from_str(r#"{"status":"pending","search":"  ","skip":10}"#).unwrap();
        assert_eq!(query.page(), Page { skip: 10, limit: 100 });

        let filter = query.filter();
        assert_eq!(filter.status, Some(TaskStatus::Pending));
        assert!(filter.search.is_none());
        assert!(query.validate().is_ok());

        let query = TaskQuery {
            limit: 0,
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
