/// Root and health endpoints
///
/// The dashboard has no database; health reports each upstream service.
///
/// ```json
/// {
///   "status": "degraded",
///   "service": "dashboard",
///   "version": "0.1.0",
///   "dependencies": {
///     "notification-service": "degraded",
///     "task-service": "healthy"
///   }
/// }
/// ```

use crate::{app::AppState, config::SERVICE_NAME, VERSION};
use axum::{extract::State, Json};
use taskminder_shared::{
    client::ClientResult,
    http::health::{HealthResponse, ServiceInfo},
};

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("Taskminder Dashboard", VERSION))
}

fn healthy(result: &ClientResult<HealthResponse>) -> bool {
    matches!(result, Ok(health) if health.is_healthy())
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (tasks, notifications) = tokio::join!(state.tasks.health(), state.notifications.health());

    Json(HealthResponse::with_dependencies(
        SERVICE_NAME,
        VERSION,
        [
            ("task-service".to_string(), healthy(&tasks)),
            ("notification-service".to_string(), healthy(&notifications)),
        ],
    ))
}
