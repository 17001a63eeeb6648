/// Task endpoints
///
/// Identifiers in paths must be 24-character hex ObjectIds; anything else is
/// rejected with 400 before storage is touched. Unknown identifiers answer
/// 404.

use crate::{app::AppState, reminders};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskminder_shared::{
    http::{ApiError, ApiResult, ValidatedJson, ValidatedQuery},
    models::{
        id::DocumentId,
        task::{Task, TaskCreate, TaskQuery, TaskStats, TaskUpdate},
        timestamp_now, MessageResponse,
    },
    repos,
};
use tracing::info;

fn found(task: Option<Task>) -> ApiResult<Task> {
    task.ok_or_else(|| ApiError::not_found("Task"))
}

/// `POST /api/v1/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TaskCreate>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = Task::new(input, timestamp_now());
    state.tasks.insert(&task).await?;
    info!(task_id = %task.id, priority = task.priority.as_str(), "Task created");

    reminders::schedule(&state.notifications, &task).await;

    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/v1/tasks`, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TaskQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.find_many(&query.filter(), query.page()).await?;
    Ok(Json(tasks))
}

/// `GET /api/v1/tasks/:id`
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let id: DocumentId = id.parse()?;
    found(state.tasks.find(&id).await?).map(Json)
}

/// `PUT /api/v1/tasks/:id`
///
/// Only supplied fields change, in storage as well, so concurrent updates
/// of different fields both survive. Setting `status` to `completed` stamps
/// `completed_at` like the completion endpoint does.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let id: DocumentId = id.parse()?;
    let task = found(state.tasks.update(&id, &update, timestamp_now()).await?)?;
    info!(task_id = %task.id, "Task updated");

    if update.touches_reminder() {
        reminders::schedule(&state.notifications, &task).await;
    }

    Ok(Json(task))
}

/// `DELETE /api/v1/tasks/:id`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: DocumentId = id.parse()?;
    if !state.tasks.delete(&id).await? {
        return Err(ApiError::not_found("Task"));
    }

    info!(task_id = %id, "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

/// `PATCH /api/v1/tasks/:id/complete`
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let id: DocumentId = id.parse()?;
    let task = found(state.tasks.complete(&id, timestamp_now()).await?)?;

    info!(task_id = %task.id, "Task completed");
    Ok(Json(task))
}

/// `GET /api/v1/tasks/stats/overview`
pub async fn task_stats(State(state): State<AppState>) -> ApiResult<Json<TaskStats>> {
    let stats = repos::task_stats(state.tasks.as_ref(), timestamp_now()).await?;
    Ok(Json(stats))
}
