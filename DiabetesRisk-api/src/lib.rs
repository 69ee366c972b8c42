// DiabetesRisk-api lib.rs
//
// HTTP surface for the diabetes risk assessment wizard.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
