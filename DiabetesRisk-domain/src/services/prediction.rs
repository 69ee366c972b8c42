use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::entities::conversions;
use crate::entities::health_profile::HealthProfile;
use crate::entities::prediction::PredictionOutcome;
use diabetes_risk_data::client::{ClientConfig, ClientError, HttpScoringClient, ScoringClientTrait};

/// Message shown to the user for any failed submission
pub const PREDICTION_FAILED_MESSAGE: &str =
    "Failed to get prediction. Please check if the backend server is running.";

/// A submission that did not produce an outcome
///
/// Displays as the user-facing message; `detail` keeps the technical cause
/// for logs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
    pub detail: String,
}

impl NetworkError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            message: PREDICTION_FAILED_MESSAGE.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<ClientError> for NetworkError {
    fn from(err: ClientError) -> Self {
        NetworkError::new(err.to_string())
    }
}

/// Trait for submitting a profile for scoring
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionClientTrait: Send + Sync {
    /// Score a complete profile; one request, never retried
    async fn submit(&self, profile: &HealthProfile) -> Result<PredictionOutcome, NetworkError>;

    /// Whether the backend is reachable and has a model loaded
    async fn check_health(&self) -> Result<bool, NetworkError>;
}

/// Prediction service backed by a scoring client
pub struct PredictionService<C: ScoringClientTrait> {
    client: C,
}

impl<C: ScoringClientTrait> PredictionService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: ScoringClientTrait + Send + Sync> PredictionClientTrait for PredictionService<C> {
    async fn submit(&self, profile: &HealthProfile) -> Result<PredictionOutcome, NetworkError> {
        let request = conversions::convert_to_data_request(profile).map_err(|missing| {
            error!("Refusing to submit an incomplete profile, missing {:?}", missing);
            NetworkError::new(format!("Profile is incomplete: {:?}", missing))
        })?;

        let response = self.client.predict(&request).await.map_err(|e| {
            error!("Prediction request failed: {}", e);
            NetworkError::from(e)
        })?;

        let outcome = conversions::convert_to_domain_outcome(response).map_err(|detail| {
            error!("Scoring service returned an unusable result: {}", detail);
            NetworkError::new(detail)
        })?;

        info!(
            "Prediction received: {} ({})",
            outcome.probability_percent(),
            outcome.risk_tier.label()
        );
        Ok(outcome)
    }

    async fn check_health(&self) -> Result<bool, NetworkError> {
        let health = self.client.check_health().await?;
        Ok(health.model_loaded)
    }
}

/// Create the default prediction service talking HTTP to the scoring backend
pub fn create_default_prediction_service(
    config: ClientConfig,
) -> Result<impl PredictionClientTrait, ClientError> {
    let client = HttpScoringClient::new(config)?;
    Ok(PredictionService::new(client))
}
