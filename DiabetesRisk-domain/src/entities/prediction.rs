use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Discrete risk tier derived from a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Consult with a healthcare professional immediately",
    "Monitor your blood sugar levels regularly",
    "Consider lifestyle changes including diet and exercise",
    "Schedule regular health check-ups",
];

const MODERATE_RECOMMENDATIONS: &[&str] = &[
    "Consider consulting with a healthcare professional",
    "Adopt a healthier diet and regular exercise routine",
    "Monitor your health metrics regularly",
    "Reduce risk factors like smoking and excessive alcohol",
];

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }

    /// Style class used by the result badge
    pub fn color_class(self) -> &'static str {
        match self {
            RiskTier::Low => "text-green-600 bg-green-100",
            RiskTier::Moderate => "text-yellow-600 bg-yellow-100",
            RiskTier::High => "text-red-600 bg-red-100",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskTier::Low => "✅",
            RiskTier::Moderate => "⚠️",
            RiskTier::High => "🚨",
        }
    }

    /// Fixed recommendation list; empty for the low tier
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskTier::Low => &[],
            RiskTier::Moderate => MODERATE_RECOMMENDATIONS,
            RiskTier::High => HIGH_RECOMMENDATIONS,
        }
    }

    /// One-line assessment shown under the probability
    pub fn assessment(self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk of diabetes",
            RiskTier::Moderate => "Moderate risk of diabetes. Consider lifestyle changes.",
            RiskTier::High => "High risk of diabetes. Please consult a healthcare professional.",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Risk", self.label())
    }
}

/// Binary class returned by the scoring model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum PredictedClass {
    NotAtRisk,
    AtRisk,
}

impl PredictedClass {
    /// Map the 0/1 wire value; anything non-zero counts as at risk
    pub fn from_wire(value: u8) -> Self {
        if value == 0 {
            PredictedClass::NotAtRisk
        } else {
            PredictedClass::AtRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PredictedClass::NotAtRisk => "Not at risk of diabetes",
            PredictedClass::AtRisk => "At risk of diabetes",
        }
    }
}

/// A classified scoring result, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PredictionOutcome {
    /// Reference printed on every report rendered from this outcome
    pub reference: Uuid,

    /// When the outcome was recorded
    pub recorded_at: DateTime<Utc>,

    /// Probability of the positive class, within [0, 1]
    pub probability: f64,

    pub predicted_class: PredictedClass,

    /// Tier recomputed from the probability
    pub risk_tier: RiskTier,

    /// Risk label reported by the scoring service, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_risk_level: Option<String>,

    /// Assessment message reported by the scoring service, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_message: Option<String>,
}

impl PredictionOutcome {
    /// Record a classified result without any server-side labels
    pub fn new(probability: f64, predicted_class: PredictedClass, risk_tier: RiskTier) -> Self {
        Self {
            reference: Uuid::new_v4(),
            recorded_at: Utc::now(),
            probability,
            predicted_class,
            risk_tier,
            server_risk_level: None,
            server_message: None,
        }
    }

    /// Probability as a percentage with one decimal, e.g. `75.0%`
    pub fn probability_percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        self.risk_tier.recommendations()
    }

    /// Assessment sentence of the recomputed tier
    pub fn assessment(&self) -> &'static str {
        self.risk_tier.assessment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_tier_has_no_recommendations() {
        assert!(RiskTier::Low.recommendations().is_empty());
        assert_eq!(RiskTier::High.recommendations().len(), 4);
        assert_eq!(RiskTier::Moderate.recommendations().len(), 4);
        assert_eq!(RiskTier::High.to_string(), "High Risk");
    }

    #[test]
    fn test_probability_percent_one_decimal() {
        let outcome = PredictionOutcome::new(0.12345, PredictedClass::NotAtRisk, RiskTier::Low);
        assert_eq!(outcome.probability_percent(), "12.3%");
        assert_eq!(outcome.assessment(), "Low risk of diabetes");
    }

    #[test]
    fn test_assessment_follows_tier_not_server_message() {
        let outcome = PredictionOutcome {
            server_risk_level: Some("Medium".to_string()),
            server_message: Some("Moderate risk of diabetes. Consider lifestyle changes.".to_string()),
            ..PredictionOutcome::new(0.65, PredictedClass::AtRisk, RiskTier::High)
        };
        assert_eq!(outcome.assessment(), RiskTier::High.assessment());
    }

    #[test]
    fn test_clones_share_reference() {
        let outcome = PredictionOutcome::new(0.4, PredictedClass::NotAtRisk, RiskTier::Moderate);
        let copy = outcome.clone();
        assert_eq!(copy.reference, outcome.reference);
        assert_ne!(
            PredictionOutcome::new(0.4, PredictedClass::NotAtRisk, RiskTier::Moderate).reference,
            outcome.reference
        );
    }

    #[test]
    fn test_predicted_class_from_wire() {
        assert_eq!(PredictedClass::from_wire(0), PredictedClass::NotAtRisk);
        assert_eq!(PredictedClass::from_wire(1), PredictedClass::AtRisk);
    }
}
