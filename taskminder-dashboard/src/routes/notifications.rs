/// Notification history and reminders page

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskminder_shared::{
    http::{ApiResult, ValidatedQuery},
    models::{
        notification::{Notification, NotificationQuery},
        reminder::{Reminder, ReminderQuery},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsOverview {
    /// Newest first
    pub notifications: Vec<Notification>,

    /// Soonest first
    pub reminders: Vec<Reminder>,
}

/// History filters apply to notifications; reminders are listed unfiltered
pub async fn overview(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<NotificationsOverview>> {
    let all_reminders = ReminderQuery::default();
    let (notifications, reminders) = tokio::join!(
        state.notifications.history(&query),
        state.notifications.list_reminders(&all_reminders),
    );

    Ok(Json(NotificationsOverview {
        notifications: notifications?,
        reminders: reminders?,
    }))
}
