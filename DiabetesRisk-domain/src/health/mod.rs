//! Domain layer health check functionality
//! This module reports on the scoring backend the assessment depends on

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::services::prediction::PredictionClientTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is reachable but cannot serve requests fully
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the scoring backend
    /// Returns true if a model is loaded, false if the backend answers without one
    /// Returns an error if the backend could not be reached
    async fn check_scoring_status(&self) -> Result<bool, String>;
}

/// Health service probing the scoring backend through the prediction client
pub struct HealthService {
    client: Arc<dyn PredictionClientTrait>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService").finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(client: Arc<dyn PredictionClientTrait>) -> Self {
        Self { client }
    }
}

/// Fold a scoring status check into a component and the overall status
fn summarize(scoring_status: Result<bool, String>) -> SystemHealth {
    let scoring_component = match scoring_status {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Scoring service is up but has no model loaded".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let overall_status = match scoring_component.status {
        ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        ComponentStatus::Degraded => SystemStatus::Degraded,
        ComponentStatus::Healthy => SystemStatus::Healthy,
    };

    SystemHealth {
        status: overall_status,
        components: vec![("scoring_service".to_string(), scoring_component)]
            .into_iter()
            .collect(),
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        summarize(self.check_scoring_status().await)
    }

    async fn check_scoring_status(&self) -> Result<bool, String> {
        self.client.check_health().await.map_err(|e| {
            warn!("Scoring service health check failed: {}", e.detail);
            format!("Scoring service unreachable: {}", e.detail)
        })
    }
}

/// Create the default health service for a prediction client
pub fn create_default_health_service(client: Arc<dyn PredictionClientTrait>) -> impl HealthServiceTrait {
    HealthService::new(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPredictionClient;

    #[tokio::test]
    async fn test_healthy_backend() {
        let service = HealthService::new(Arc::new(MockPredictionClient::new()));
        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("scoring_service"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unhealthy() {
        let service = HealthService::new(Arc::new(MockPredictionClient::new().unreachable()));
        let health = service.get_system_health().await;
        assert_eq!(health.status, SystemStatus::Unhealthy);
        let component = &health.components["scoring_service"];
        assert!(component.details.as_deref().unwrap_or_default().contains("unreachable"));
    }

    #[test]
    fn test_missing_model_is_degraded() {
        let health = summarize(Ok(false));
        assert_eq!(health.status, SystemStatus::Degraded);
    }
}
