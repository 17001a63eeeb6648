//! # Taskminder Dashboard
//!
//! ```bash
//! TASK_SERVICE_URL=http://localhost:8000/api/v1 \
//! NOTIFICATION_SERVICE_URL=http://localhost:8001/api/v1 \
//!     cargo run -p taskminder-dashboard
//! ```

use taskminder_dashboard::{
    app::{build_router, AppState},
    config::Config,
};
use taskminder_shared::{
    http::server::{serve, shutdown_on_signal},
    telemetry,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("taskminder_dashboard=debug,taskminder_shared=debug,tower_http=debug")?;

    tracing::info!("Taskminder dashboard v{} starting...", taskminder_dashboard::VERSION);

    let config = Config::from_env()?;
    let address = config.bind_address();
    tracing::info!(
        task_service = %config.task_service.url,
        notification_service = %config.notification_service.url,
        "Upstream services"
    );
    let state = AppState::new(config)?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    serve(build_router(state), &address, shutdown).await
}
