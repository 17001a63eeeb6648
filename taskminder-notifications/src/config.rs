/// Configuration management for the notification service
///
/// # Environment Variables
///
/// - `API_HOST` / `API_PORT`: Bind address (default: 0.0.0.0:8001)
/// - `CORS_ORIGINS`, `PRODUCTION`: See `taskminder_shared::config`
/// - `DATABASE_BACKEND`: `mongo` or `memory` (default: mongo)
/// - `MONGODB_URL`: MongoDB connection string (default: mongodb://localhost:27017)
/// - `DATABASE_NAME`: Database name (default: notification_db)
/// - `DATABASE_MAX_POOL_SIZE`: Driver pool size (default: 10)
/// - `REMINDER_POLL_INTERVAL_SECS`: Dispatcher interval, 0 disables it (default: 60)

use std::time::Duration;
use taskminder_shared::config::{parse_var, process_env, ApiConfig, StorageConfig};

pub const SERVICE_NAME: &str = "notification-service";
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_DATABASE: &str = "notification_db";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Complete notification service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub dispatcher: DispatcherConfig,
}

/// Background dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Seconds between due-reminder sweeps; 0 disables the loop
    pub poll_interval_secs: u64,
}

impl DispatcherConfig {
    pub fn enabled(&self) -> bool {
        self.poll_interval_secs > 0
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables (and `.env`)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(&process_env())
    }

    pub fn load(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiConfig::load(lookup, DEFAULT_PORT)?,
            storage: StorageConfig::load(lookup, DEFAULT_DATABASE, SERVICE_NAME)?,
            dispatcher: DispatcherConfig {
                poll_interval_secs: parse_var(
                    lookup,
                    "REMINDER_POLL_INTERVAL_SECS",
                    DEFAULT_POLL_INTERVAL_SECS,
                )?,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        self.api.bind_address()
    }
}
