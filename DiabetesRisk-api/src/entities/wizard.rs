use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use diabetes_risk_domain::entities::{HealthProfile, PredictedClass, PredictionOutcome, RiskTier, WizardSection};
use diabetes_risk_domain::services::{validation, FieldUpdate, FormWizard, RawInput, ReportFormat, Transition};

/// One wizard section as seen by the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SectionView {
    pub index: usize,
    pub title: String,
    /// Every required field is set and in range
    pub complete: bool,
    /// The section can be jumped to
    pub reached: bool,
    /// Wire names of required fields still unset
    pub missing: Vec<String>,
}

/// Classified result with its display metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutcomeView {
    /// Reference printed on the report for this result
    pub reference: String,
    pub probability: f64,
    /// Probability as a percentage with one decimal
    pub probability_percent: String,
    pub predicted_class: PredictedClass,
    pub prediction_label: String,
    pub risk_tier: RiskTier,
    pub risk_label: String,
    pub color_class: String,
    pub icon: String,
    pub assessment: String,
    /// Empty for the low tier
    pub recommendations: Vec<String>,
    /// Label reported by the scoring service, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_risk_level: Option<String>,
    /// Message reported by the scoring service, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_message: Option<String>,
}

impl From<&PredictionOutcome> for OutcomeView {
    fn from(outcome: &PredictionOutcome) -> Self {
        Self {
            reference: outcome.reference.to_string(),
            probability: outcome.probability,
            probability_percent: outcome.probability_percent(),
            predicted_class: outcome.predicted_class,
            prediction_label: outcome.predicted_class.label().to_string(),
            risk_tier: outcome.risk_tier,
            risk_label: outcome.risk_tier.to_string(),
            color_class: outcome.risk_tier.color_class().to_string(),
            icon: outcome.risk_tier.icon().to_string(),
            assessment: outcome.assessment().to_string(),
            recommendations: outcome.recommendations().iter().map(|r| r.to_string()).collect(),
            server_risk_level: outcome.server_risk_level.clone(),
            server_message: outcome.server_message.clone(),
        }
    }
}

/// Full wizard state returned by every wizard operation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WizardStateResponse {
    /// Session generation; bumped by every reset
    pub generation: u64,
    pub current_section: usize,
    pub sections: Vec<SectionView>,
    pub can_advance: bool,
    pub can_submit: bool,
    pub submitting: bool,
    /// Banner shown after a failed submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub profile: HealthProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeView>,
}

impl From<&FormWizard> for WizardStateResponse {
    fn from(wizard: &FormWizard) -> Self {
        let profile = wizard.profile();
        let sections = WizardSection::ALL
            .iter()
            .map(|section| SectionView {
                index: section.index(),
                title: section.title().to_string(),
                complete: validation::is_section_complete(*section, profile),
                reached: section.index() <= wizard.furthest_index(),
                missing: validation::missing_fields(*section, profile)
                    .into_iter()
                    .map(|field| field.name().to_string())
                    .collect(),
            })
            .collect();

        Self {
            generation: wizard.generation(),
            current_section: wizard.current_index(),
            sections,
            can_advance: wizard.can_advance(),
            can_submit: wizard.can_submit(),
            submitting: wizard.is_submitting(),
            error: wizard.error().map(str::to_string),
            profile: profile.clone(),
            outcome: wizard.outcome().map(OutcomeView::from),
        }
    }
}

/// Raw input event for one field
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldInputRequest {
    /// Text, number or checkbox state; `""` or `null` clears the field
    pub value: Option<RawInput>,
}

/// Result of a field edit
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldInputResponse {
    pub field: String,
    pub update: FieldUpdate,
    pub state: WizardStateResponse,
}

/// Result of a navigation or submission request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitionResponse {
    pub transition: Transition,
    /// Whether a submission ran as part of this request
    pub submitted: bool,
    pub state: WizardStateResponse,
}

/// Query parameters for report downloads and exports
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `pdf` (default) or `text`
    pub format: Option<ReportFormat>,
}

/// Result of writing the report into the export directory
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    pub file_name: String,
    pub path: String,
    pub bytes: usize,
}
