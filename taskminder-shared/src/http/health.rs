/// Root and health payloads
///
/// ```text
/// GET /        -> {"message": "Task Service", "version": "0.1.0"}
/// GET /health  -> {"status": "healthy", "service": "task-service",
///                  "version": "0.1.0", "database": "connected"}
/// ```
///
/// Health always answers 200; an unreachable dependency turns `status` into
/// `"degraded"` so orchestrator probes can tell a live-but-impaired replica
/// from a dead one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root endpoint response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Human-readable service name
    pub message: String,

    /// Crate version
    pub version: String,
}

impl ServiceInfo {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            message: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"degraded"`
    pub status: String,

    /// Service identifier
    pub service: String,

    /// Application version
    pub version: String,

    /// Database status, for services that own a database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Upstream service status, for the dashboard
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
}

fn status(ok: bool) -> String {
    if ok { "healthy" } else { "degraded" }.to_string()
}

impl HealthResponse {
    /// Health of a service backed by its own database
    pub fn with_database(service: &str, version: &str, connected: bool) -> Self {
        Self {
            status: status(connected),
            service: service.to_string(),
            version: version.to_string(),
            database: Some(if connected { "connected" } else { "disconnected" }.to_string()),
            dependencies: BTreeMap::new(),
        }
    }

    /// Health of a service that only depends on other services
    pub fn with_dependencies(
        service: &str,
        version: &str,
        dependencies: impl IntoIterator<Item = (String, bool)>,
    ) -> Self {
        let dependencies: BTreeMap<String, bool> = dependencies.into_iter().collect();
        Self {
            status: status(dependencies.values().all(|ok| *ok)),
            service: service.to_string(),
            version: version.to_string(),
            database: None,
            dependencies: dependencies
                .into_iter()
                .map(|(name, ok)| (name, status(ok)))
                .collect(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_health() {
        let health = HealthResponse::with_database("task-service", "0.1.0", false);
        assert_eq!(health.status, "degraded");
        assert_eq!(health.database.as_deref(), Some("disconnected"));

        let json = serde_json::to_value(&health).unwrap();
        assert!(json.get("dependencies").is_none());
    }

    #[test]
    fn test_dependency_health_degrades_on_any_failure() {
        let health = HealthResponse::with_dependencies(
            "dashboard",
            "0.1.0",
            [("tasks".to_string(), true), ("notifications".to_string(), false)],
        );
        assert!(!health.is_healthy());
        assert_eq!(health.dependencies["tasks"], "healthy");
        assert_eq!(health.dependencies["notifications"], "degraded");
    }
}
