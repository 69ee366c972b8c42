use diabetes_risk_data::models::prediction::{PredictionRequest, PredictionResponse};

use super::fields::ProfileField;
use super::health_profile::{ChoiceField, HealthProfile};
use super::prediction::{PredictedClass, PredictionOutcome};
use crate::services::risk;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

fn flag(value: bool) -> u8 {
    u8::from(value)
}

fn literal<T: ChoiceField>(value: Option<T>) -> Option<String> {
    value.map(|v| v.as_str().to_string())
}

/// Build the scoring payload from a profile
///
/// Fails with the list of unset fields when the profile is incomplete; a
/// partial payload is never produced.
pub fn convert_to_data_request(profile: &HealthProfile) -> Result<PredictionRequest, Vec<ProfileField>> {
    let missing: Vec<ProfileField> = ProfileField::ALL
        .iter()
        .copied()
        .filter(|field| !profile.is_set(*field))
        .collect();

    let build = || -> Option<PredictionRequest> {
        Some(PredictionRequest {
            age: profile.age()?,
            hypertension: flag(profile.hypertension()),
            heart_disease: flag(profile.heart_disease()),
            bmi: profile.bmi()?,
            hba1c_level: profile.hba1c_level()?,
            blood_glucose_level: profile.blood_glucose_level()?,
            physical_inactivity: flag(profile.physical_inactivity()),
            prediabetes: flag(profile.prediabetes()),
            high_blood_pressure: flag(profile.high_blood_pressure()),
            hdl_cholesterol: profile.hdl_cholesterol()?,
            triglycerides: profile.triglycerides()?,
            sleep_hours: profile.sleep_hours()?,
            gender: literal(profile.gender())?,
            smoking_history: literal(profile.smoking_history())?,
            obesity_status: literal(profile.obesity_status())?,
            dietary_habits: literal(profile.dietary_habits())?,
            alcohol_use: literal(profile.alcohol_use())?,
        })
    };

    match build() {
        Some(request) if missing.is_empty() => Ok(request),
        _ => Err(missing),
    }
}

/// Classify a scoring response
///
/// Fails when the probability is not a finite number within [0, 1].
pub fn convert_to_domain_outcome(response: PredictionResponse) -> Result<PredictionOutcome, String> {
    let probability = response.probability;
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(format!("Probability {} is outside [0, 1]", probability));
    }

    let risk_tier = risk::classify(probability);
    if let Some(label) = response.risk_level.as_deref() {
        risk::log_label_disagreement(label, risk_tier);
    }

    Ok(PredictionOutcome {
        server_risk_level: response.risk_level,
        server_message: response.message,
        ..PredictionOutcome::new(probability, PredictedClass::from_wire(response.prediction), risk_tier)
    })
}
