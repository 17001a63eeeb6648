/// Reminder endpoints
///
/// Reminders are listed soonest first. Path identifiers follow the task
/// service rules: malformed → 400, unknown → 404.

use crate::{
    app::AppState,
    dispatcher::{dispatch_due, DispatchReport},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskminder_shared::{
    http::{ApiError, ApiResult, ValidatedJson, ValidatedQuery},
    models::{
        id::DocumentId,
        reminder::{Reminder, ReminderCreate, ReminderQuery, ReminderUpdate},
        timestamp_now, MessageResponse,
    },
};
use tracing::info;

/// Response of the on-demand due check
#[derive(Debug, Serialize, Deserialize)]
pub struct DueCheckResponse {
    pub message: String,
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
}

impl From<DispatchReport> for DueCheckResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            message: format!("Processed {} due reminders", report.processed),
            processed: report.processed,
            sent: report.sent,
            failed: report.failed,
        }
    }
}

async fn load(state: &AppState, id: &str) -> ApiResult<Reminder> {
    let id: DocumentId = id.parse()?;
    state
        .reminders
        .find(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reminder"))
}

/// `POST /api/v1/reminders`
pub async fn create_reminder(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ReminderCreate>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
    let reminder = Reminder::new(input, timestamp_now());
    state.reminders.insert(&reminder).await?;
    info!(
        reminder_id = %reminder.id,
        task_id = %reminder.task_id,
        reminder_time = %reminder.reminder_time,
        "Reminder created"
    );
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// `GET /api/v1/reminders`
pub async fn list_reminders(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReminderQuery>,
) -> ApiResult<Json<Vec<Reminder>>> {
    let reminders = state
        .reminders
        .find_many(&query.filter(), query.page())
        .await?;
    Ok(Json(reminders))
}

/// `GET /api/v1/reminders/:id`
pub async fn get_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Reminder>> {
    load(&state, &id).await.map(Json)
}

/// `PUT /api/v1/reminders/:id`
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<ReminderUpdate>,
) -> ApiResult<Json<Reminder>> {
    let id: DocumentId = id.parse()?;
    let reminder = state
        .reminders
        .update(&id, &update, timestamp_now())
        .await?
        .ok_or_else(|| ApiError::not_found("Reminder"))?;
    info!(reminder_id = %reminder.id, "Reminder updated");
    Ok(Json(reminder))
}

/// `DELETE /api/v1/reminders/:id`
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: DocumentId = id.parse()?;
    if !state.reminders.delete(&id).await? {
        return Err(ApiError::not_found("Reminder"));
    }
    info!(reminder_id = %id, "Reminder deleted");
    Ok(Json(MessageResponse::new("Reminder deleted successfully")))
}

/// `GET /api/v1/reminders/due/check`
///
/// Runs one dispatcher sweep immediately.
pub async fn check_due_reminders(
    State(state): State<AppState>,
) -> ApiResult<Json<DueCheckResponse>> {
    let report = dispatch_due(
        state.reminders.as_ref(),
        state.notifications.as_ref(),
        state.sender.as_ref(),
        timestamp_now(),
    )
    .await?;
    Ok(Json(report.into()))
}
