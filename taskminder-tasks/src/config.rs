/// Configuration management for the task service
///
/// # Environment Variables
///
/// - `API_HOST` / `API_PORT`: Bind address (default: 0.0.0.0:8000)
/// - `CORS_ORIGINS`, `PRODUCTION`: See `taskminder_shared::config`
/// - `DATABASE_BACKEND`: `mongo` or `memory` (default: mongo)
/// - `MONGODB_URL`: MongoDB connection string (default: mongodb://localhost:27017)
/// - `DATABASE_NAME`: Database name (default: task_db)
/// - `DATABASE_MAX_POOL_SIZE`: Driver pool size (default: 10)
/// - `NOTIFICATION_SERVICE_URL`: Notification API root
///   (default: http://notification-service:8001/api/v1)
/// - `HTTP_CLIENT_TIMEOUT_SECS`: Timeout of reminder scheduling calls (default: 10)
///
/// # Example
///
/// ```no_run
/// use taskminder_tasks::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use taskminder_shared::config::{process_env, ApiConfig, StorageConfig, UpstreamConfig};

pub const SERVICE_NAME: &str = "task-service";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE: &str = "task_db";
pub const DEFAULT_NOTIFICATION_SERVICE_URL: &str = "http://notification-service:8001/api/v1";

/// Complete task service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub notification_service: UpstreamConfig,
}

impl Config {
    /// Loads configuration from environment variables (and `.env`)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparsable value.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(&process_env())
    }

    pub fn load(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiConfig::load(lookup, DEFAULT_PORT)?,
            storage: StorageConfig::load(lookup, DEFAULT_DATABASE, SERVICE_NAME)?,
            notification_service: UpstreamConfig::load(
                lookup,
                "NOTIFICATION_SERVICE_URL",
                DEFAULT_NOTIFICATION_SERVICE_URL,
            )?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        self.api.bind_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskminder_shared::config::DatabaseBackend;

    #[test]
    fn test_defaults() {
        let config = Config::load(&|_: &str| None::<String>).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.storage.backend, DatabaseBackend::Mongo);
        assert_eq!(config.storage.database.database, "task_db");
        assert_eq!(
            config.notification_service.url,
            "http://notification-service:8001/api/v1"
        );
        assert_eq!(config.notification_service.timeout_seconds, 10);
    }

    #[test]
    fn test_overrides() {
        let config = Config::load(&|key: &str| match key {
            "API_PORT" => Some("9000".to_string()),
            "DATABASE_NAME" => Some("tasks_test".to_string()),
            "NOTIFICATION_SERVICE_URL" => Some("http://localhost:8001/api/v1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.storage.database.database, "tasks_test");
        assert_eq!(config.notification_service.url, "http://localhost:8001/api/v1");
    }
}
