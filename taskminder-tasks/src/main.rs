//! # Taskminder Task Service
//!
//! ```bash
//! MONGODB_URL=mongodb://localhost:27017 cargo run -p taskminder-tasks
//! ```

use taskminder_shared::{
    http::server::{serve, shutdown_on_signal},
    telemetry,
};
use taskminder_tasks::{
    app::{build_router, AppState},
    config::Config,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("taskminder_tasks=debug,taskminder_shared=debug,tower_http=debug")?;

    tracing::info!("Taskminder task service v{} starting...", taskminder_tasks::VERSION);

    let config = Config::from_env()?;
    let address = config.bind_address();
    let state = AppState::connect(config).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    serve(build_router(state), &address, shutdown).await
}
