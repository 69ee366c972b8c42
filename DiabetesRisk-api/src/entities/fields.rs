use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use diabetes_risk_domain::entities::{FieldKind, ProfileField, WizardSection};

/// Metadata for one form field
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldInfo {
    /// Wire name, used in the field update path
    pub name: String,
    pub label: String,
    pub description: String,
    /// "integer", "decimal", "choice" or "flag"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Allowed literals for choice fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Index of the section that renders the field
    pub section: usize,
    pub required: bool,
}

impl From<ProfileField> for FieldInfo {
    fn from(field: ProfileField) -> Self {
        let kind = field.kind();
        let section = WizardSection::of_field(field);
        let (min, max) = match field.range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        let values = match kind {
            FieldKind::Choice(values) => Some(values.iter().map(|v| v.to_string()).collect()),
            _ => None,
        };

        Self {
            name: field.name().to_string(),
            label: field.label().to_string(),
            description: field.description().to_string(),
            kind: kind.name().to_string(),
            min,
            max,
            values,
            section: section.index(),
            required: section.required_fields().contains(&field),
        }
    }
}
