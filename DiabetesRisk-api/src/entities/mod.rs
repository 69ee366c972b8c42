// Public entities for the Diabetes Risk API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Field metadata
pub mod fields;

// Wizard state and operation results
pub mod wizard;
