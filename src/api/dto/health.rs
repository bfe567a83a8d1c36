//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health report for the loaded route table.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub routes: RouteTableSummary,
    pub checks: Vec<RouteCheck>,
}

/// Size of the route table and the view names it can reverse.
#[derive(Debug, Serialize)]
pub struct RouteTableSummary {
    pub total: usize,
    pub named: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteCheck {
    pub name: &'static str,
    pub passed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RouteCheck {
    pub fn passed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            message: Some(message.into()),
        }
    }
}
