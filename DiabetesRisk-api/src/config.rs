//! Server configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

use diabetes_risk_data::client::{ClientConfig, DEFAULT_SCORING_URL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Front-end origins allowed by default
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5174",
    "http://127.0.0.1:5174",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("SCORING_TIMEOUT_SECS must be a positive whole number of seconds, got '{0}'")]
    InvalidTimeout(String),

    #[error("SCORING_API_URL must start with http:// or https://, got '{0}'")]
    InvalidScoringUrl(String),

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub scoring: ClientConfig,
    pub export_dir: PathBuf,
    pub allowed_origins: Vec<HeaderValue>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            scoring: ClientConfig::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let base_url = lookup("SCORING_API_URL").unwrap_or_else(|| DEFAULT_SCORING_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidScoringUrl(base_url));
        }

        let timeout_secs = match lookup("SCORING_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let export_dir = lookup("EXPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));

        let allowed_origins = match lookup("ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => Self::default().allowed_origins,
        };

        Ok(Self {
            port,
            scoring: ClientConfig::new(base_url).with_timeout(Duration::from_secs(timeout_secs)),
            export_dir,
            allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string())))
        .collect()
}
