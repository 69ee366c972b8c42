// Diabetes Risk Data
// This crate handles external service interactions and report artifact storage

// Scoring service client
pub mod client;

// Exported report storage
pub mod export;

// Wire models
pub mod models;
