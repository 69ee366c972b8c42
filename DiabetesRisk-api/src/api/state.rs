use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use diabetes_risk_data::client::ClientError;
use diabetes_risk_data::export::ReportStore;
use diabetes_risk_domain::health::{create_default_health_service, HealthServiceTrait};
use diabetes_risk_domain::services::{create_default_prediction_service, FormWizard, NetworkError, PredictionClientTrait};

use crate::config::AppConfig;

/// Prediction client shared by the handlers
pub type PredictionClient = Arc<dyn PredictionClientTrait>;

/// Health service shared by the handlers
pub type HealthService = Arc<dyn HealthServiceTrait + Send + Sync>;

/// State shared by every handler: the single wizard session and its collaborators
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<Mutex<FormWizard>>,
    pub client: PredictionClient,
    pub health: HealthService,
    pub store: ReportStore,
}

impl AppState {
    /// Assemble the state around an existing prediction client
    pub fn new(client: PredictionClient, store: ReportStore) -> Self {
        let health: HealthService = Arc::new(create_default_health_service(client.clone()));
        Self {
            wizard: Arc::new(Mutex::new(FormWizard::new())),
            client,
            health,
            store,
        }
    }

    /// Build the state for a running server
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client: PredictionClient = Arc::new(create_default_prediction_service(config.scoring.clone())?);
        info!("Scoring service at {}", config.scoring.base_url);
        Ok(Self::new(client, ReportStore::new(config.export_dir.clone())))
    }

    /// Run one submission if the wizard allows it
    ///
    /// The wizard lock is released while the request is outstanding; a reset in
    /// the meantime makes the response stale and it is dropped. The request and
    /// its completion run on a spawned task, so the wizard leaves the submitting
    /// state even if the caller goes away. Returns whether a submission was
    /// started.
    pub async fn submit(&self) -> bool {
        let ticket = {
            let mut wizard = self.wizard.lock().await;
            wizard.begin_submission()
        };
        let Some(ticket) = ticket else {
            debug!("Submission not allowed in the current wizard state");
            return false;
        };

        let wizard = self.wizard.clone();
        let client = self.client.clone();
        let task_ticket = ticket.clone();
        let task = tokio::spawn(async move {
            let result = client.submit(task_ticket.profile()).await;
            wizard.lock().await.complete_submission(task_ticket, result);
        });

        if let Err(e) = task.await {
            error!("Submission task failed: {}", e);
            let mut wizard = self.wizard.lock().await;
            wizard.complete_submission(ticket, Err(NetworkError::new(e.to_string())));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use diabetes_risk_domain::entities::ProfileField;
    use diabetes_risk_domain::testing::MockPredictionClient;

    use super::*;

    fn state_with(client: MockPredictionClient) -> (AppState, Arc<MockPredictionClient>) {
        let client = Arc::new(client);
        let store = ReportStore::new(std::env::temp_dir().join(format!("diabetes-risk-{}", uuid::Uuid::new_v4())));
        let state = AppState::new(client.clone(), store);
        (state, client)
    }

    async fn fill_and_reach_last_section(state: &AppState) {
        let sections: [&[(ProfileField, &str)]; 3] = [
            &[
                (ProfileField::Age, "45"),
                (ProfileField::Gender, "M"),
                (ProfileField::Bmi, "27.5"),
                (ProfileField::ObesityStatus, "Overweight"),
            ],
            &[
                (ProfileField::Hba1cLevel, "6.1"),
                (ProfileField::BloodGlucoseLevel, "140"),
                (ProfileField::HdlCholesterol, "45"),
                (ProfileField::Triglycerides, "160"),
            ],
            &[
                (ProfileField::SleepHours, "6.5"),
                (ProfileField::SmokingHistory, "never"),
                (ProfileField::DietaryHabits, "Mixed"),
                (ProfileField::AlcoholUse, "None"),
            ],
        ];

        let mut wizard = state.wizard.lock().await;
        for (i, inputs) in sections.iter().enumerate() {
            for (field, raw) in inputs.iter() {
                wizard.set_field(*field, &(*raw).into());
            }
            if i < 2 {
                wizard.advance();
            }
        }
        assert_eq!(wizard.current_index(), 2);
        assert!(wizard.can_submit());
    }

    #[tokio::test]
    async fn test_submit_records_outcome() {
        let (state, client) = state_with(MockPredictionClient::new().with_probability(0.72, 1));
        fill_and_reach_last_section(&state).await;

        assert!(state.submit().await);

        let wizard = state.wizard.lock().await;
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.outcome().map(|o| o.probability), Some(0.72));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_submit_still_completes() {
        let (state, client) = state_with(
            MockPredictionClient::new()
                .with_probability(0.72, 1)
                .with_delay(Duration::from_millis(200)),
        );
        fill_and_reach_last_section(&state).await;

        // The caller gives up while the request is outstanding
        let cancelled = tokio::time::timeout(Duration::from_millis(50), state.submit()).await;
        assert!(cancelled.is_err());
        assert!(state.wizard.lock().await.is_submitting());

        tokio::time::sleep(Duration::from_millis(400)).await;

        let wizard = state.wizard.lock().await;
        assert!(!wizard.is_submitting());
        assert!(wizard.outcome().is_some());
        assert_eq!(client.call_count(), 1);
    }
}
