/// Environment configuration shared by the services
///
/// Each service loads its own `Config` from environment variables; the
/// pieces every service needs (bind address, CORS, database selection) are
/// parsed here. Loading goes through a lookup function so the parsing can
/// be exercised without touching the process environment.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (service specific default)
/// - `CORS_ORIGINS`: Comma separated allowed origins (default: `*`)
/// - `PRODUCTION`: Enables HSTS (default: false)
/// - `DATABASE_BACKEND`: `mongo` or `memory` (default: mongo)
/// - `MONGODB_URL`: Connection string (default: mongodb://localhost:27017)
/// - `DATABASE_NAME`: Database name (service specific default)
/// - `DATABASE_MAX_POOL_SIZE`: Driver pool size (default: 10)
/// - `HTTP_CLIENT_TIMEOUT_SECS`: Timeout for calls to other services (default: 10)

use crate::db::client::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Reads the process environment, loading `.env` first if present
pub fn process_env() -> impl Fn(&str) -> Option<String> {
    dotenvy::dotenv().ok();
    |key: &str| std::env::var(key).ok()
}

/// Returns the value of `key`, or `default` when unset or blank
pub fn var_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses `key`, falling back to `default` when unset
///
/// # Errors
///
/// Returns an error naming the variable if the value does not parse.
pub fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid value for {}: {:?} ({})", key, raw, e)),
        None => Ok(default),
    }
}

/// Parses a boolean flag (`true/false`, `1/0`, `yes/no`)
pub fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> anyhow::Result<bool> {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("invalid value for {}: {:?} (expected a boolean)", key, v),
        },
    }
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,

    /// Production mode (HSTS)
    pub production: bool,
}

impl ApiConfig {
    pub fn load(
        lookup: &impl Fn(&str) -> Option<String>,
        default_port: u16,
    ) -> anyhow::Result<Self> {
        let cors_origins = var_or(lookup, "CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: var_or(lookup, "API_HOST", "0.0.0.0"),
            port: parse_var(lookup, "API_PORT", default_port)?,
            cors_origins,
            production: parse_flag(lookup, "PRODUCTION", false)?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Storage used by a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// MongoDB (production)
    Mongo,

    /// Process-local collections, lost on restart (local development)
    Memory,
}

impl FromStr for DatabaseBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(DatabaseBackend::Mongo),
            "memory" | "inmemory" => Ok(DatabaseBackend::Memory),
            other => Err(format!("unknown database backend {}", other)),
        }
    }
}

/// Storage configuration of a database-backed service
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub backend: DatabaseBackend,
    pub database: DatabaseConfig,
}

impl StorageConfig {
    pub fn load(
        lookup: &impl Fn(&str) -> Option<String>,
        default_database: &str,
        app_name: &str,
    ) -> anyhow::Result<Self> {
        let defaults = DatabaseConfig::default();
        Ok(Self {
            backend: parse_var(lookup, "DATABASE_BACKEND", DatabaseBackend::Mongo)?,
            database: DatabaseConfig {
                url: var_or(lookup, "MONGODB_URL", &defaults.url),
                database: var_or(lookup, "DATABASE_NAME", default_database),
                max_pool_size: parse_var(lookup, "DATABASE_MAX_POOL_SIZE", defaults.max_pool_size)?,
                app_name: Some(app_name.to_string()),
                ..defaults
            },
        })
    }
}

/// Another Taskminder service this one calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API root, e.g. `http://notification-service:8001/api/v1`
    pub url: String,

    pub timeout_seconds: u64,
}

impl UpstreamConfig {
    pub fn load(
        lookup: &impl Fn(&str) -> Option<String>,
        url_key: &str,
        default_url: &str,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            url: var_or(lookup, url_key, default_url),
            timeout_seconds: parse_var(lookup, "HTTP_CLIENT_TIMEOUT_SECS", 10)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
