use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::models::prediction::{PredictionRequest, PredictionResponse, ScoringHealth};
use super::errors::ClientError;

/// Default base URL of the scoring service
pub const DEFAULT_SCORING_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the scoring service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without the `/predict` suffix
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCORING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `SCORING_API_URL` and `SCORING_TIMEOUT_SECS`, falling back to defaults
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = env::var("SCORING_API_URL").unwrap_or_else(|_| DEFAULT_SCORING_URL.to_string());

        let timeout_secs = match env::var("SCORING_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ClientError::Config(format!("SCORING_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw)))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        if timeout_secs == 0 {
            return Err(ClientError::Config("SCORING_TIMEOUT_SECS must be greater than zero".to_string()));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/// Client trait for the external scoring service
#[async_trait]
pub trait ScoringClientTrait {
    /// Send one prediction request; never retried
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError>;

    /// Query the service health endpoint
    async fn check_health(&self) -> Result<ScoringHealth, ClientError>;
}

/// reqwest-backed scoring client
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpScoringClient {
    /// Build a client from the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "Scoring service URL must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl ScoringClientTrait for HttpScoringClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
        let url = self.config.endpoint("predict");
        debug!("Sending prediction request to {}", url);

        let response = self.http.post(&url).json(request).send().await.map_err(|e| {
            error!("Prediction request to {} failed: {}", url, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Scoring service returned {} for {}", status, url);
            return Err(ClientError::status(status.as_u16(), &body));
        }

        let parsed: PredictionResponse = serde_json::from_str(&body)?;
        info!("Scoring service answered with probability {:.3}", parsed.probability);
        Ok(parsed)
    }

    async fn check_health(&self) -> Result<ScoringHealth, ClientError> {
        let url = self.config.endpoint("health");
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

// Mock client shared with dependent crates through the `mock` feature
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// In-memory scoring client that answers with a canned response
    #[derive(Debug)]
    pub struct MockScoringClient {
        response: Option<PredictionResponse>,
        failure_status: u16,
        model_loaded: bool,
        calls: AtomicUsize,
        last_request: Mutex<Option<PredictionRequest>>,
    }

    impl Default for MockScoringClient {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockScoringClient {
        /// A healthy mock answering probability 0.1 / prediction 0
        pub fn new() -> Self {
            Self {
                response: Some(PredictionResponse {
                    probability: 0.1,
                    prediction: 0,
                    risk_level: Some("Low".to_string()),
                    message: Some("Low risk of diabetes".to_string()),
                }),
                failure_status: 500,
                model_loaded: true,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        /// Answer every prediction with the given response
        pub fn with_response(mut self, response: PredictionResponse) -> Self {
            self.response = Some(response);
            self
        }

        /// Answer with a bare probability / prediction pair
        pub fn with_probability(self, probability: f64, prediction: u8) -> Self {
            self.with_response(PredictionResponse {
                probability,
                prediction,
                risk_level: None,
                message: None,
            })
        }

        /// Fail every prediction with the given HTTP status
        pub fn with_failure(mut self, status: u16) -> Self {
            self.response = None;
            self.failure_status = status;
            self
        }

        /// Report that the backend has no model loaded
        pub fn without_model(mut self) -> Self {
            self.model_loaded = false;
            self
        }

        /// Number of prediction calls received
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Most recent request payload
        pub fn last_request(&self) -> Option<PredictionRequest> {
            self.last_request.lock().ok().and_then(|guard| guard.clone())
        }
    }

    #[async_trait]
    impl ScoringClientTrait for MockScoringClient {
        async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut last) = self.last_request.lock() {
                *last = Some(request.clone());
            }

            match &self.response {
                Some(response) => Ok(response.clone()),
                None => Err(ClientError::status(self.failure_status, "mock is configured to fail")),
            }
        }

        async fn check_health(&self) -> Result<ScoringHealth, ClientError> {
            Ok(ScoringHealth {
                status: "healthy".to_string(),
                model_loaded: self.model_loaded,
            })
        }
    }
}
