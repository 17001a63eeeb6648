/// Task analytics endpoint

use crate::{
    analytics::{compute, Analytics},
    app::AppState,
};
use axum::{extract::State, Json};
use taskminder_shared::{http::ApiResult, models::task::TaskQuery};

pub async fn analytics(State(state): State<AppState>) -> ApiResult<Json<Analytics>> {
    let all = TaskQuery::default();
    let (stats, tasks) = tokio::join!(state.tasks.stats(), state.tasks.list_all(&all));
    Ok(Json(compute(&stats?, &tasks?)))
}
