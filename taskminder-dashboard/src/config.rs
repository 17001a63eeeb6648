/// Configuration management for the dashboard backend
///
/// # Environment Variables
///
/// - `API_HOST` / `API_PORT`: Bind address (default: 0.0.0.0:8501)
/// - `CORS_ORIGINS`, `PRODUCTION`: See `taskminder_shared::config`
/// - `TASK_SERVICE_URL`: Task API root (default: http://task-service:8000/api/v1)
/// - `NOTIFICATION_SERVICE_URL`: Notification API root
///   (default: http://notification-service:8001/api/v1)
/// - `HTTP_CLIENT_TIMEOUT_SECS`: Timeout of upstream calls (default: 10)

use taskminder_shared::config::{process_env, ApiConfig, UpstreamConfig};

pub const SERVICE_NAME: &str = "dashboard";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_TASK_SERVICE_URL: &str = "http://task-service:8000/api/v1";
pub const DEFAULT_NOTIFICATION_SERVICE_URL: &str = "http://notification-service:8001/api/v1";

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub task_service: UpstreamConfig,
    pub notification_service: UpstreamConfig,
}

impl Config {
    /// Loads configuration from environment variables (and `.env`)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(&process_env())
    }

    pub fn load(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiConfig::load(lookup, DEFAULT_PORT)?,
            task_service: UpstreamConfig::load(
                lookup,
                "TASK_SERVICE_URL",
                DEFAULT_TASK_SERVICE_URL,
            )?,
            notification_service: UpstreamConfig::load(
                lookup,
                "NOTIFICATION_SERVICE_URL",
                DEFAULT_NOTIFICATION_SERVICE_URL,
            )?,
        })
    }

    pub fn bind_address(&self) -> String {
        self.api.bind_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(&|_: &str| None::<String>).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8501");
        assert_eq!(config.task_service.url, "http://task-service:8000/api/v1");
        assert_eq!(
            config.notification_service.url,
            "http://notification-service:8001/api/v1"
        );
    }

    #[test]
    fn test_upstream_overrides() {
        let config = Config::load(&|key: &str| match key {
            "TASK_SERVICE_URL" => Some("http://localhost:8000/api/v1".to_string()),
            "HTTP_CLIENT_TIMEOUT_SECS" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.task_service.url, "http://localhost:8000/api/v1");
        assert_eq!(config.task_service.timeout_seconds, 3);
        assert_eq!(config.notification_service.timeout_seconds, 3);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = Config::load(&|key: &str| {
            (key == "HTTP_CLIENT_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
