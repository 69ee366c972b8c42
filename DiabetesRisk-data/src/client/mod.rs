// Scoring service client module structure
pub mod errors;
mod scoring;

// Re-export commonly used types
pub use errors::ClientError;
pub use scoring::{ClientConfig, HttpScoringClient, ScoringClientTrait, DEFAULT_SCORING_URL, DEFAULT_TIMEOUT_SECS};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use scoring::tests;
