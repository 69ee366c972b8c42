// Wire models exchanged with the scoring service
pub mod prediction;

pub use prediction::{PredictionRequest, PredictionResponse, ScoringHealth};
