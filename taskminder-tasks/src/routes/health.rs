/// Root and health endpoints
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "task-service",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, config::SERVICE_NAME, VERSION};
use axum::{extract::State, Json};
use taskminder_shared::http::health::{HealthResponse, ServiceInfo};

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("Task Service", VERSION))
}

/// Reports database reachability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.tasks.ping().await.is_ok();
    Json(HealthResponse::with_database(SERVICE_NAME, VERSION, connected))
}
