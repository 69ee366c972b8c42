pub mod coercion;
pub mod prediction;
pub mod report;
pub mod risk;
pub mod validation;
pub mod wizard;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use coercion::{coerce, RawInput};
pub use prediction::{
    create_default_prediction_service, NetworkError, PredictionClientTrait, PredictionService,
    PREDICTION_FAILED_MESSAGE,
};
pub use report::{export, AssessmentReport, ReportError, ReportFormat, REPORT_FILE_NAME};
pub use risk::{classify, interpret_server_label};
pub use validation::{is_profile_complete, is_section_complete, missing_fields};
pub use wizard::{FieldUpdate, FormWizard, SubmissionTicket, SubmitResult, Transition};

