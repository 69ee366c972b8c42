// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

// Re-export the scoring client mock from the data layer
pub use diabetes_risk_data::client::tests::MockScoringClient;

use crate::entities::health_profile::{AlcoholUse, DietaryHabits, Gender, HealthProfile, ObesityStatus, SmokingHistory};
use crate::entities::prediction::{PredictedClass, PredictionOutcome};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::prediction::{NetworkError, PredictionClientTrait};
use crate::services::risk::classify;

/// A complete profile: 45-year-old male, BMI 27.5, all condition flags 0
pub fn sample_profile() -> HealthProfile {
    let mut profile = HealthProfile::new();
    // The literals below are all within range
    let _ = profile.set_age(Some(45));
    profile.set_gender(Some(Gender::Male));
    let _ = profile.set_bmi(Some(27.5));
    profile.set_obesity_status(Some(ObesityStatus::Overweight));
    let _ = profile.set_hba1c_level(Some(6.1));
    let _ = profile.set_blood_glucose_level(Some(140));
    let _ = profile.set_hdl_cholesterol(Some(45.0));
    let _ = profile.set_triglycerides(Some(160.0));
    let _ = profile.set_sleep_hours(Some(6.5));
    profile.set_smoking_history(Some(SmokingHistory::Never));
    profile.set_dietary_habits(Some(DietaryHabits::Mixed));
    profile.set_alcohol_use(Some(AlcoholUse::None));
    profile
}

/// Build an outcome the way the scoring path would for this probability
pub fn sample_outcome(probability: f64, prediction: u8) -> PredictionOutcome {
    PredictionOutcome::new(probability, PredictedClass::from_wire(prediction), classify(probability))
}

/// Prediction client answering from canned values
#[derive(Debug)]
pub struct MockPredictionClient {
    outcome: Option<PredictionOutcome>,
    model_loaded: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl Default for MockPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPredictionClient {
    /// A client answering with a low-risk outcome
    pub fn new() -> Self {
        Self {
            outcome: Some(sample_outcome(0.1, 0)),
            model_loaded: true,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every submission with this probability / prediction
    pub fn with_probability(mut self, probability: f64, prediction: u8) -> Self {
        self.outcome = Some(sample_outcome(probability, prediction));
        self
    }

    /// Fail every submission
    pub fn with_failure(mut self) -> Self {
        self.outcome = None;
        self
    }

    /// Hold every submission for this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report the backend as unreachable
    pub fn unreachable(mut self) -> Self {
        self.model_loaded = false;
        self.outcome = None;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionClientTrait for MockPredictionClient {
    async fn submit(&self, _profile: &HealthProfile) -> Result<PredictionOutcome, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome
            .clone()
            .ok_or_else(|| NetworkError::new("mock is configured to fail"))
    }

    async fn check_health(&self) -> Result<bool, NetworkError> {
        if self.model_loaded || self.outcome.is_some() {
            Ok(self.model_loaded)
        } else {
            Err(NetworkError::new("mock backend is unreachable"))
        }
    }
}

/// Mock health service with a fixed report
#[derive(Debug, Clone)]
pub struct MockHealthService {
    status: SystemStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    pub fn new() -> Self {
        Self {
            status: SystemStatus::Healthy,
        }
    }

    pub fn with_status(mut self, status: SystemStatus) -> Self {
        self.status = status;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let component_status = match self.status {
            SystemStatus::Healthy => ComponentStatus::Healthy,
            SystemStatus::Degraded => ComponentStatus::Degraded,
            SystemStatus::Unhealthy => ComponentStatus::Unhealthy,
        };

        SystemHealth {
            status: self.status.clone(),
            components: vec![(
                "scoring_service".to_string(),
                HealthComponent {
                    status: component_status,
                    details: None,
                },
            )]
            .into_iter()
            .collect(),
        }
    }

    async fn check_scoring_status(&self) -> Result<bool, String> {
        match self.status {
            SystemStatus::Healthy => Ok(true),
            SystemStatus::Degraded => Ok(false),
            SystemStatus::Unhealthy => Err("Mock scoring service is unavailable".to_string()),
        }
    }
}
