use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use diabetes_risk_domain::health::{ComponentStatus as DomainComponentStatus, SystemStatus};

use crate::api::state::AppState;

/// Health check response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about the components the service depends on
    pub components: ComponentStatus,
}

/// Status of individual system components
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// This API
    pub api: ComponentHealthStatus,
    /// Remote scoring backend
    pub scoring_service: ComponentHealthStatus,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let _ = SERVER_START_TIME.set(now_secs());
    });
}

/// Health check endpoint, including the scoring backend
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API and scoring backend are healthy", body = HealthResponse),
        (status = 500, description = "Scoring backend is unreachable", body = HealthResponse),
        (status = 503, description = "Scoring backend has no model loaded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let now = now_secs();
    let uptime = SERVER_START_TIME.get().map(|&start_time| now.saturating_sub(start_time));

    let system_health = state.health.get_system_health().await;
    let scoring = system_health.components.get("scoring_service");

    let response = HealthResponse {
        status: map_system_status(&system_health.status).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: ComponentStatus {
            api: ComponentHealthStatus {
                status: "ok".to_string(),
                message: None,
            },
            scoring_service: ComponentHealthStatus {
                status: scoring
                    .map(|c| map_component_status(&c.status))
                    .unwrap_or("error")
                    .to_string(),
                message: scoring.and_then(|c| c.details.clone()),
            },
        },
    };

    let status = match system_health.status {
        SystemStatus::Healthy => StatusCode::OK,
        SystemStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        SystemStatus::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(response))
}

fn map_system_status(status: &SystemStatus) -> &'static str {
    match status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    }
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> &'static str {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
}
