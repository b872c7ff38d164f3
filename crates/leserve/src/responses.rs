//! API response types matching client contract

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::requests::AnalyzeRequest;

/// Service name reported by the health check
pub const HEALTH_SERVICE_NAME: &str = "Task Priority Analyzer";

/// Service name reported by the info endpoint
pub const SERVICE_NAME: &str = "Smart Task Manager - Priority Analysis Service";

/// Response for `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process is serving
    pub status: String,

    /// Service name
    pub service: String,
}

impl HealthResponse {
    /// Healthy response
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: HEALTH_SERVICE_NAME.to_string(),
        }
    }
}

/// Response for `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    /// Service name
    pub service: String,

    /// Crate version
    pub version: String,

    /// Route to description
    pub endpoints: BTreeMap<String, String>,

    /// Sample analyze body
    pub example_request: AnalyzeRequest,
}

impl ServiceInfoResponse {
    /// Describe this service
    pub fn current() -> Self {
        let endpoints = [
            ("/analyze", "POST - Analyze task priority"),
            ("/health", "GET - Health check"),
        ]
        .into_iter()
        .map(|(route, summary)| (route.to_string(), summary.to_string()))
        .collect();

        Self {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
            example_request: AnalyzeRequest {
                title: "Fix critical bug in production".to_string(),
                description: Some("Users cannot login".to_string()),
                deadline: Some("2024-01-15T10:00:00Z".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        let value = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": "healthy", "service": "Task Priority Analyzer" })
        );
    }

    #[test]
    fn test_service_info_lists_endpoints() {
        let info = ServiceInfoResponse::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.endpoints.contains_key("/analyze"));
        assert!(info.endpoints.contains_key("/health"));
        assert_eq!(info.example_request.title, "Fix critical bug in production");
    }
}
