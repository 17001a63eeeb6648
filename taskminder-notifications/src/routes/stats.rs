use crate::app::AppState;
use axum::{extract::State, Json};
use taskminder_shared::{
    http::ApiResult,
    models::{notification::NotificationStats, timestamp_now},
    repos,
};

/// `GET /api/v1/stats/overview`
pub async fn stats_overview(State(state): State<AppState>) -> ApiResult<Json<NotificationStats>> {
    let stats = repos::notification_stats(
        state.reminders.as_ref(),
        state.notifications.as_ref(),
        timestamp_now(),
    )
    .await?;
    Ok(Json(stats))
}
