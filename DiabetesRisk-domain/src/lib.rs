// Diabetes Risk Domain
// This crate contains the assessment wizard, scoring and reporting logic

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the data layer's client and export modules for convenience
pub use diabetes_risk_data::{client, export};

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
