use tracing::debug;
use validator::Validate;

use crate::entities::fields::ProfileField;
use crate::entities::health_profile::HealthProfile;
use crate::entities::wizard::WizardSection;

/// Required fields of the section that are still unset
pub fn missing_fields(section: WizardSection, profile: &HealthProfile) -> Vec<ProfileField> {
    section
        .required_fields()
        .iter()
        .copied()
        .filter(|field| !profile.is_set(*field))
        .collect()
}

/// Section fields holding a value outside their declared range
///
/// Only a deserialized profile can get here; the setters refuse such values.
pub fn invalid_fields(section: WizardSection, profile: &HealthProfile) -> Vec<ProfileField> {
    let Err(errors) = profile.validate() else {
        return Vec::new();
    };

    let failing = errors.field_errors();
    section
        .fields()
        .iter()
        .copied()
        .filter(|field| failing.keys().any(|key| key.eq_ignore_ascii_case(field.name())))
        .collect()
}

/// Whether every required field of the section is set and in range
pub fn is_section_complete(section: WizardSection, profile: &HealthProfile) -> bool {
    let missing = missing_fields(section, profile);
    if !missing.is_empty() {
        debug!("{} incomplete, missing {:?}", section, missing);
        return false;
    }

    let invalid = invalid_fields(section, profile);
    if !invalid.is_empty() {
        debug!("{} has out-of-range values in {:?}", section, invalid);
        return false;
    }

    true
}

/// Whether every section is complete
pub fn is_profile_complete(profile: &HealthProfile) -> bool {
    WizardSection::ALL
        .iter()
        .all(|section| is_section_complete(*section, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::health_profile::{AlcoholUse, DietaryHabits, Gender, ObesityStatus, SmokingHistory};

    fn personal(profile: &mut HealthProfile) {
        profile.set_age(Some(45)).unwrap();
        profile.set_gender(Some(Gender::Female));
        profile.set_bmi(Some(22.0)).unwrap();
        profile.set_obesity_status(Some(ObesityStatus::Normal));
    }

    #[test]
    fn test_empty_profile_is_incomplete_everywhere() {
        let profile = HealthProfile::new();
        for section in WizardSection::ALL {
            assert!(!is_section_complete(section, &profile));
        }
        assert_eq!(
            missing_fields(WizardSection::PersonalInformation, &profile),
            vec![ProfileField::Age, ProfileField::Gender, ProfileField::Bmi, ProfileField::ObesityStatus]
        );
    }

    #[test]
    fn test_personal_section_complete() {
        let mut profile = HealthProfile::new();
        personal(&mut profile);
        assert!(is_section_complete(WizardSection::PersonalInformation, &profile));
        assert!(!is_section_complete(WizardSection::HealthMetrics, &profile));
    }

    #[test]
    fn test_zero_counts_as_set() {
        let mut profile = HealthProfile::new();
        profile.set_sleep_hours(Some(0.0)).unwrap();
        profile.set_smoking_history(Some(SmokingHistory::NoInfo));
        profile.set_dietary_habits(Some(DietaryHabits::Healthy));
        profile.set_alcohol_use(Some(AlcoholUse::None));
        assert!(is_section_complete(WizardSection::LifestyleFactors, &profile));
    }

    #[test]
    fn test_flags_are_not_required() {
        let mut profile = HealthProfile::new();
        profile.set_hba1c_level(Some(5.5)).unwrap();
        profile.set_blood_glucose_level(Some(100)).unwrap();
        profile.set_hdl_cholesterol(Some(50.0)).unwrap();
        profile.set_triglycerides(Some(120.0)).unwrap();
        assert!(is_section_complete(WizardSection::HealthMetrics, &profile));
    }

    #[test]
    fn test_deserialized_out_of_range_fails_softly() {
        let profile: HealthProfile = serde_json::from_str(
            r#"{"age": 200, "gender": "M", "bmi": 25.0, "obesity_status": "Normal", "HbA1c_level": 1.0}"#,
        )
        .unwrap();

        assert!(!is_section_complete(WizardSection::PersonalInformation, &profile));
        assert_eq!(invalid_fields(WizardSection::PersonalInformation, &profile), vec![ProfileField::Age]);
        assert_eq!(invalid_fields(WizardSection::HealthMetrics, &profile), vec![ProfileField::Hba1cLevel]);
        assert!(!is_profile_complete(&profile));
    }
}
