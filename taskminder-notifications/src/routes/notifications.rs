/// Notification endpoints
///
/// `POST /notifications/send` delivers through the configured sender before
/// answering, so the returned notification already carries its final
/// status (`sent`, or `failed` with `error_message`).

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, Json};
use taskminder_shared::{
    http::{ApiResult, ValidatedJson, ValidatedQuery},
    models::{
        notification::{Notification, NotificationCreate, NotificationQuery},
        timestamp_now,
    },
};
use tracing::{info, warn};

/// `POST /api/v1/notifications/send`
pub async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NotificationCreate>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let mut notification = Notification::new(input, timestamp_now());
    state.notifications.insert(&notification).await?;

    match state.sender.send(&notification).await {
        Ok(()) => {
            notification.mark_sent(timestamp_now());
            info!(notification_id = %notification.id, "Notification sent");
        }
        Err(e) => {
            warn!(notification_id = %notification.id, error = %e, "Notification failed");
            notification.mark_failed(e.to_string());
        }
    }
    state.notifications.save(&notification).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// `GET /api/v1/notifications/history`, newest first
pub async fn notification_history(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state
        .notifications
        .find_many(&query.filter(), query.page())
        .await?;
    Ok(Json(notifications))
}
