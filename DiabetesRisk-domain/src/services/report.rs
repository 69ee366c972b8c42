//! Rendering of a classified result into a downloadable report

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::health_profile::HealthProfile;
use crate::entities::prediction::{PredictionOutcome, RiskTier};
use crate::entities::wizard::WizardSection;

/// File name of the exported PDF
pub const REPORT_FILE_NAME: &str = "Diabetes_Risk_Assessment.pdf";

/// File name of the plain-text rendering
pub const REPORT_TEXT_FILE_NAME: &str = "Diabetes_Risk_Assessment.txt";

pub const REPORT_TITLE: &str = "Diabetes Risk Assessment Report";

pub const DISCLAIMER: &str = "This prediction is based on machine learning algorithms and should not \
replace professional medical advice. Please consult with healthcare professionals for accurate \
diagnosis and treatment.";

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const LINE_HEIGHT: i64 = 15;
const WRAP_COLUMNS: usize = 88;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to render report: {0}")]
    Render(String),
}

/// Output format of an exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum ReportFormat {
    #[default]
    Pdf,
    Text,
}

impl ReportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Pdf => REPORT_FILE_NAME,
            ReportFormat::Text => REPORT_TEXT_FILE_NAME,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    /// Render the report in this format
    pub fn render(self, report: &AssessmentReport) -> Result<Vec<u8>, ReportError> {
        match self {
            ReportFormat::Pdf => report.render_pdf(),
            ReportFormat::Text => Ok(report.render_text().into_bytes()),
        }
    }
}

/// One submitted input as shown in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReportEntry {
    pub section: String,
    pub label: String,
    pub value: String,
}

/// A rendered assessment, independent of output format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct AssessmentReport {
    /// Reference id printed on the report
    pub id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub title: String,
    /// Binary prediction label
    pub prediction: String,
    /// Probability as a percentage with one decimal
    pub probability: String,
    pub risk_tier: RiskTier,
    pub assessment: String,
    /// Empty for the low tier
    pub recommendations: Vec<String>,
    pub inputs: Vec<ReportEntry>,
    pub disclaimer: String,
}

/// Build the report for an outcome and the profile that produced it
pub fn export(outcome: &PredictionOutcome, profile: &HealthProfile) -> AssessmentReport {
    let inputs = WizardSection::ALL
        .iter()
        .flat_map(|section| {
            section.fields().iter().filter_map(move |field| {
                profile.get(*field).display().map(|value| ReportEntry {
                    section: section.title().to_string(),
                    label: field.label().to_string(),
                    value,
                })
            })
        })
        .collect();

    AssessmentReport {
        id: outcome.reference,
        assessed_at: outcome.recorded_at,
        title: REPORT_TITLE.to_string(),
        prediction: outcome.predicted_class.label().to_string(),
        probability: outcome.probability_percent(),
        risk_tier: outcome.risk_tier,
        assessment: outcome.assessment().to_string(),
        recommendations: outcome.recommendations().iter().map(|r| r.to_string()).collect(),
        inputs,
        disclaimer: DISCLAIMER.to_string(),
    }
}

impl AssessmentReport {
    /// Report body as lines of text, shared by both renderers
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.title.clone(),
            String::new(),
            format!("Reference: {}", self.id),
            format!("Assessed: {}", self.assessed_at.format("%Y-%m-%d %H:%M:%S UTC")),
            String::new(),
            format!("Prediction: {}", self.prediction),
            format!("Probability: {}", self.probability),
            format!("Risk Level: {}", self.risk_tier),
            format!("Assessment: {}", self.assessment),
        ];

        if !self.recommendations.is_empty() {
            lines.push(String::new());
            lines.push("Recommendations:".to_string());
            for (i, recommendation) in self.recommendations.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, recommendation));
            }
        }

        let mut section = "";
        for entry in &self.inputs {
            if entry.section != section {
                section = &entry.section;
                lines.push(String::new());
                lines.push(format!("{}:", section));
            }
            lines.push(format!("  {}: {}", entry.label, entry.value));
        }

        lines.push(String::new());
        lines.push(format!("Disclaimer: {}", self.disclaimer));
        lines
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        let mut text = self.lines().join("\n");
        text.push('\n');
        text
    }

    /// Single-page PDF rendering
    pub fn render_pdf(&self) -> Result<Vec<u8>, ReportError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
                "F2" => bold_id,
            },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F2".into(), Object::Integer(16)]),
            Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN)]),
            Operation::new("Tj", vec![Object::string_literal(pdf_text(&self.title))]),
            Operation::new("Tf", vec!["F1".into(), Object::Integer(11)]),
            Operation::new("TL", vec![Object::Integer(LINE_HEIGHT)]),
            Operation::new("T*", vec![]),
        ];

        for line in self.lines().iter().skip(1) {
            for wrapped in wrap(line, WRAP_COLUMNS) {
                operations.push(Operation::new("T*", vec![]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(pdf_text(&wrapped))]));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .map_err(|e| ReportError::Render(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ReportError::Render(e.to_string()))?;
        debug!("Rendered report {} ({} bytes)", self.id, bytes.len());
        Ok(bytes)
    }
}

/// Reduce text to what the standard Type1 fonts can show
fn pdf_text(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Greedy word wrap; words longer than `width` are kept whole
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.len() <= width {
        return vec![line.to_string()];
    }

    let indent: String = line.chars().take_while(|c| *c == ' ').collect();
    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            wrapped.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            current.push_str(if wrapped.is_empty() { &indent } else { "    " });
        } else {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::conversions::convert_to_domain_outcome;
    use crate::entities::prediction::PredictedClass;
    use crate::services::risk::classify;
    use crate::testing::sample_profile;
    use diabetes_risk_data::models::prediction::PredictionResponse;

    fn outcome(probability: f64) -> PredictionOutcome {
        PredictionOutcome::new(
            probability,
            PredictedClass::from_wire(u8::from(probability >= 0.5)),
            classify(probability),
        )
    }

    #[test]
    fn test_server_message_does_not_override_tier() {
        let outcome = convert_to_domain_outcome(PredictionResponse {
            probability: 0.65,
            prediction: 1,
            risk_level: Some("Medium".to_string()),
            message: Some("Moderate risk of diabetes. Consider lifestyle changes.".to_string()),
        })
        .unwrap();

        let text = export(&outcome, &sample_profile()).render_text();
        assert!(text.contains("Risk Level: High Risk"));
        assert!(text.contains("Assessment: High risk of diabetes. Please consult a healthcare professional."));
        assert!(!text.contains("Moderate risk"));
    }

    #[test]
    fn test_repeated_exports_share_reference() {
        let outcome = outcome(0.45);
        let first = export(&outcome, &sample_profile());
        let second = export(&outcome, &sample_profile());

        assert_eq!(first.id, outcome.reference);
        assert_eq!(first.id, second.id);
        assert_eq!(first.assessed_at, second.assessed_at);
        assert_eq!(first.render_text(), second.render_text());
    }

    #[test]
    fn test_high_risk_report_lists_recommendations() {
        let report = export(&outcome(0.75), &sample_profile());
        assert_eq!(report.risk_tier, RiskTier::High);
        assert_eq!(report.probability, "75.0%");
        assert_eq!(report.prediction, "At risk of diabetes");
        assert_eq!(report.recommendations.len(), 4);

        let text = report.render_text();
        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Risk Level: High Risk"));
        assert!(text.contains("1. Consult with a healthcare professional immediately"));
        assert!(text.contains("4. Schedule regular health check-ups"));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn test_low_risk_report_omits_recommendations() {
        let report = export(&outcome(0.1), &sample_profile());
        assert!(report.recommendations.is_empty());

        let text = report.render_text();
        assert!(!text.contains("Recommendations:"));
        assert!(text.contains("Assessment: Low risk of diabetes"));
    }

    #[test]
    fn test_report_includes_submitted_inputs() {
        let report = export(&outcome(0.45), &sample_profile());
        let age = report.inputs.iter().find(|e| e.label == "Age").unwrap();
        assert_eq!(age.value, "45");
        assert_eq!(age.section, "Personal Information");

        let hypertension = report.inputs.iter().find(|e| e.label == "Hypertension").unwrap();
        assert_eq!(hypertension.value, "No");
        assert_eq!(report.inputs.len(), 17);
    }

    #[test]
    fn test_render_pdf() {
        let report = export(&outcome(0.65), &sample_profile());
        let bytes = ReportFormat::Pdf.render(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_wrap() {
        let long = "word ".repeat(40);
        let lines = wrap(long.trim_end(), 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 24));
        assert_eq!(wrap("short", 20), vec!["short".to_string()]);
    }

    #[test]
    fn test_pdf_text_replaces_non_ascii() {
        assert_eq!(pdf_text("High 🚨"), "High ?");
    }
}
