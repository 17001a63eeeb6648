/// Task actions
///
/// Request bodies are validated here with the same schemas the task service
/// uses, then forwarded. Upstream 400/404/422 answers come back unchanged;
/// any other upstream failure becomes 503.

use crate::app::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskminder_shared::{
    http::{ApiResult, ValidatedJson, ValidatedQuery},
    models::{
        task::{Task, TaskCreate, TaskQuery, TaskUpdate},
        MessageResponse,
    },
};

pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TaskQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list(&query).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TaskCreate>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(&input).await?;
    tracing::info!(task_id = %task.id, "Task created via dashboard");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.tasks.get(&id).await?))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.tasks.update(&id, &update).await?))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(state.tasks.delete(&id).await?))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.tasks.complete(&id).await?))
}
