use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::fields::ProfileField;

/// The fixed, ordered sections of the assessment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum WizardSection {
    PersonalInformation,
    HealthMetrics,
    LifestyleFactors,
}

impl WizardSection {
    /// Sections in form order
    pub const ALL: [WizardSection; 3] = [
        WizardSection::PersonalInformation,
        WizardSection::HealthMetrics,
        WizardSection::LifestyleFactors,
    ];

    /// Number of sections
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position in the form
    pub fn index(self) -> usize {
        match self {
            WizardSection::PersonalInformation => 0,
            WizardSection::HealthMetrics => 1,
            WizardSection::LifestyleFactors => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardSection::PersonalInformation => "Personal Information",
            WizardSection::HealthMetrics => "Health Metrics",
            WizardSection::LifestyleFactors => "Lifestyle Factors",
        }
    }

    /// Whether this is the final section, where advancing means submitting
    pub fn is_last(self) -> bool {
        self.index() + 1 == Self::COUNT
    }

    /// Every field rendered in this section
    pub fn fields(self) -> &'static [ProfileField] {
        match self {
            WizardSection::PersonalInformation => &[
                ProfileField::Age,
                ProfileField::Gender,
                ProfileField::Bmi,
                ProfileField::ObesityStatus,
            ],
            WizardSection::HealthMetrics => &[
                ProfileField::Hba1cLevel,
                ProfileField::BloodGlucoseLevel,
                ProfileField::HdlCholesterol,
                ProfileField::Triglycerides,
                ProfileField::Hypertension,
                ProfileField::HeartDisease,
                ProfileField::Prediabetes,
                ProfileField::HighBloodPressure,
            ],
            WizardSection::LifestyleFactors => &[
                ProfileField::SleepHours,
                ProfileField::SmokingHistory,
                ProfileField::DietaryHabits,
                ProfileField::AlcoholUse,
                ProfileField::PhysicalInactivity,
            ],
        }
    }

    /// Fields that must hold a value before the section can be left forward
    pub fn required_fields(self) -> &'static [ProfileField] {
        match self {
            WizardSection::PersonalInformation => &[
                ProfileField::Age,
                ProfileField::Gender,
                ProfileField::Bmi,
                ProfileField::ObesityStatus,
            ],
            WizardSection::HealthMetrics => &[
                ProfileField::Hba1cLevel,
                ProfileField::BloodGlucoseLevel,
                ProfileField::HdlCholesterol,
                ProfileField::Triglycerides,
            ],
            WizardSection::LifestyleFactors => &[
                ProfileField::SleepHours,
                ProfileField::SmokingHistory,
                ProfileField::DietaryHabits,
                ProfileField::AlcoholUse,
            ],
        }
    }

    /// Section that owns a field
    pub fn of_field(field: ProfileField) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|section| section.fields().contains(&field))
            .unwrap_or(WizardSection::PersonalInformation)
    }
}

impl std::fmt::Display for WizardSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_field_owned_exactly_once() {
        let mut seen = HashSet::new();
        for section in WizardSection::ALL {
            for field in section.fields() {
                assert!(seen.insert(*field), "{} owned twice", field);
            }
            for required in section.required_fields() {
                assert!(section.fields().contains(required));
            }
        }
        assert_eq!(seen.len(), ProfileField::ALL.len());
    }

    #[test]
    fn test_index_order() {
        for (i, section) in WizardSection::ALL.iter().enumerate() {
            assert_eq!(section.index(), i);
            assert_eq!(WizardSection::from_index(i), Some(*section));
        }
        assert_eq!(WizardSection::from_index(3), None);
        assert!(WizardSection::LifestyleFactors.is_last());
        assert!(!WizardSection::HealthMetrics.is_last());
    }

    #[test]
    fn test_of_field() {
        assert_eq!(WizardSection::of_field(ProfileField::PhysicalInactivity), WizardSection::LifestyleFactors);
        assert_eq!(WizardSection::of_field(ProfileField::Hba1cLevel), WizardSection::HealthMetrics);
    }
}
