/// Overview page data
///
/// Each section is fetched independently. A failing upstream leaves its
/// section empty and adds a line to `warnings`; the endpoint itself still
/// answers 200 so the page can render what is available.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskminder_shared::{
    client::ClientResult,
    models::{
        notification::{NotificationStats, NotificationStatus},
        reminder::{Reminder, ReminderQuery},
        task::{Task, TaskQuery, TaskStats},
    },
};

/// Tasks and reminders shown on the overview
pub const RECENT_LIMIT: u64 = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub task_stats: Option<TaskStats>,
    pub notification_stats: Option<NotificationStats>,

    /// Newest tasks first
    pub recent_tasks: Vec<Task>,

    /// Pending reminders, soonest first
    pub upcoming_reminders: Vec<Reminder>,

    pub warnings: Vec<String>,
}

fn section<T>(result: ClientResult<T>, what: &str, warnings: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(section = what, error = %e, "Dashboard section unavailable");
            warnings.push(format!("Could not load {}: {}", what, e));
            None
        }
    }
}

pub async fn summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    let recent = TaskQuery {
        limit: RECENT_LIMIT,
        ..Default::default()
    };
    let upcoming = ReminderQuery {
        limit: RECENT_LIMIT,
        status: Some(NotificationStatus::Pending),
        ..Default::default()
    };

    let (task_stats, notification_stats, recent_tasks, upcoming_reminders) = tokio::join!(
        state.tasks.stats(),
        state.notifications.stats(),
        state.tasks.list(&recent),
        state.notifications.list_reminders(&upcoming),
    );

    let mut warnings = Vec::new();
    let task_stats = section(task_stats, "task statistics", &mut warnings);
    let notification_stats = section(notification_stats, "notification statistics", &mut warnings);
    let recent_tasks = section(recent_tasks, "recent tasks", &mut warnings).unwrap_or_default();
    let upcoming_reminders =
        section(upcoming_reminders, "upcoming reminders", &mut warnings).unwrap_or_default();

    Json(DashboardSummary {
        task_stats,
        notification_stats,
        recent_tasks,
        upcoming_reminders,
        warnings,
    })
}
