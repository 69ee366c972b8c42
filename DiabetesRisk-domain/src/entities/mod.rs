// Domain entities and value objects
pub mod conversions;
pub mod fields;
pub mod health_profile;
pub mod prediction;
pub mod wizard;

// Re-export common types for easier imports
pub use fields::{FieldKind, FieldValue, ProfileField};
pub use health_profile::{
    AlcoholUse, ChoiceField, DietaryHabits, Gender, HealthProfile, ObesityStatus, ProfileError, SmokingHistory,
};
pub use prediction::{PredictedClass, PredictionOutcome, RiskTier};
pub use wizard::WizardSection;
