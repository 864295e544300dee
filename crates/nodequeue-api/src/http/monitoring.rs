//! Monitoring and health check handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Number of stored nodes, when storage answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check that probes the database.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, nodes, message) = match state.store.count().await {
        Ok(count) => (HealthStatus::Healthy, StatusCode::OK, Some(count), None),
        Err(e) => {
            error!("Health check storage probe failed: {}", e);
            (
                HealthStatus::Unhealthy,
                StatusCode::SERVICE_UNAVAILABLE,
                None,
                Some(e.to_string()),
            )
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.uptime().as_secs(),
            nodes,
            message,
        }),
    )
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "alive" }))
}

#[cfg(test)]
#[path = "monitoring_tests.rs"]
mod tests;
