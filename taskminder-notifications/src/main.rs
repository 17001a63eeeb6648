//! # Taskminder Notification Service
//!
//! Serves the reminder/notification API and, unless
//! `REMINDER_POLL_INTERVAL_SECS=0`, runs the due-reminder dispatcher in the
//! same process.

use std::sync::Arc;
use taskminder_notifications::{
    app::{build_router, AppState},
    config::Config,
    sender::LogSender,
};
use taskminder_shared::{
    http::server::{serve, shutdown_on_signal},
    telemetry,
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("taskminder_notifications=debug,taskminder_shared=debug,tower_http=debug")?;

    tracing::info!(
        "Taskminder notification service v{} starting...",
        taskminder_notifications::VERSION
    );

    let config = Config::from_env()?;
    let address = config.bind_address();
    let state = AppState::connect(config, Arc::new(LogSender)).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let dispatcher = if state.config.dispatcher.enabled() {
        Some(tokio::spawn(
            state.dispatcher().with_shutdown(shutdown.clone()).run(),
        ))
    } else {
        tracing::info!("Reminder dispatcher disabled");
        None
    };

    let result = serve(build_router(state), &address, shutdown.clone()).await;

    shutdown.cancel();
    if let Some(handle) = dispatcher {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Reminder dispatcher task failed");
        }
    }

    result
}
