use serde::{Deserialize, Serialize};

/// Wire payload for `POST /predict`
///
/// Field names match the scoring service exactly. Flags travel as 0/1 and
/// categorical values as their literal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Age in years
    pub age: u32,

    /// Hypertension status (0 or 1)
    pub hypertension: u8,

    /// Heart disease status (0 or 1)
    pub heart_disease: u8,

    /// Body mass index
    pub bmi: f64,

    /// Glycated haemoglobin level
    #[serde(rename = "HbA1c_level")]
    pub hba1c_level: f64,

    /// Blood glucose level in mg/dL
    pub blood_glucose_level: u32,

    /// Physical inactivity (0 active, 1 inactive)
    pub physical_inactivity: u8,

    /// Prediabetes status (0 or 1)
    pub prediabetes: u8,

    /// High blood pressure (0 or 1)
    pub high_blood_pressure: u8,

    /// HDL cholesterol
    pub hdl_cholesterol: f64,

    /// Triglycerides level
    pub triglycerides: f64,

    /// Average sleep hours per night
    pub sleep_hours: f64,

    /// Gender literal (`M` or `F`)
    pub gender: String,

    /// Smoking history literal
    pub smoking_history: String,

    /// Obesity status literal
    pub obesity_status: String,

    /// Dietary habits literal
    pub dietary_habits: String,

    /// Alcohol use literal
    pub alcohol_use: String,
}

/// Body returned by the scoring service on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Probability of the positive class
    pub probability: f64,

    /// Binary prediction (1 = at risk)
    pub prediction: u8,

    /// Risk label computed by the service, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,

    /// Free-text assessment message from the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body returned by the scoring service's `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringHealth {
    /// Free-form status string ("healthy")
    pub status: String,

    /// Whether the service has a trained model loaded
    #[serde(default)]
    pub model_loaded: bool,
}
