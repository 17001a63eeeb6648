use crate::{app::AppState, config::SERVICE_NAME, VERSION};
use axum::{extract::State, Json};
use taskminder_shared::http::health::{HealthResponse, ServiceInfo};

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("Notification Service", VERSION))
}

/// `GET /health`, pings the reminders database
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.reminders.ping().await.is_ok();
    Json(HealthResponse::with_database(SERVICE_NAME, VERSION, connected))
}
