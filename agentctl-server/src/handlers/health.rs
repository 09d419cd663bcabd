use axum::{extract::State, response::Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime: u64,
    /// Schema kinds and whether each one is loaded
    pub schemas: BTreeMap<String, bool>,
}

/// Version information response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
    pub protocols: Vec<String>,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let schemas = schema_registry::SchemaKind::ALL
        .iter()
        .map(|kind| (kind.display_name().to_string(), state.schemas.is_loaded(*kind)))
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.uptime_seconds(),
        schemas,
    })
}

pub async fn version_info() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocols: ["AIP-1", "CTX-1", "ADP-1", "PVS-1"]
            .iter()
            .map(|p| p.to_string())
            .collect(),
    })
}
