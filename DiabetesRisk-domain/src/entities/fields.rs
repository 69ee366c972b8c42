use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Every attribute collected by the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum ProfileField {
    #[serde(rename = "age")]
    Age,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "bmi")]
    Bmi,
    #[serde(rename = "obesity_status")]
    ObesityStatus,
    #[serde(rename = "HbA1c_level")]
    Hba1cLevel,
    #[serde(rename = "blood_glucose_level")]
    BloodGlucoseLevel,
    #[serde(rename = "hdl_cholesterol")]
    HdlCholesterol,
    #[serde(rename = "triglycerides")]
    Triglycerides,
    #[serde(rename = "sleep_hours")]
    SleepHours,
    #[serde(rename = "smoking_history")]
    SmokingHistory,
    #[serde(rename = "dietary_habits")]
    DietaryHabits,
    #[serde(rename = "alcohol_use")]
    AlcoholUse,
    #[serde(rename = "hypertension")]
    Hypertension,
    #[serde(rename = "heart_disease")]
    HeartDisease,
    #[serde(rename = "physical_inactivity")]
    PhysicalInactivity,
    #[serde(rename = "prediabetes")]
    Prediabetes,
    #[serde(rename = "high_blood_pressure")]
    HighBloodPressure,
}

/// Declared type and domain of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole number within an inclusive range
    Integer { min: i64, max: i64 },
    /// Decimal number within an inclusive range
    Decimal { min: f64, max: f64 },
    /// One of a fixed set of literals
    Choice(&'static [&'static str]),
    /// 0/1 condition flag
    Flag,
}

impl FieldKind {
    /// Short name used in error messages and field metadata
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer { .. } => "integer",
            FieldKind::Decimal { .. } => "decimal",
            FieldKind::Choice(_) => "choice",
            FieldKind::Flag => "flag",
        }
    }
}

/// A typed field value, or the unset sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Unset,
    Integer(i64),
    Decimal(f64),
    Choice(&'static str),
    Flag(bool),
}

impl FieldValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Unset)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Unset => "unset",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Choice(_) => "choice",
            FieldValue::Flag(_) => "flag",
        }
    }

    /// Human-readable rendering, `None` when unset
    pub fn display(&self) -> Option<String> {
        match self {
            FieldValue::Unset => None,
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Decimal(x) => Some(format!("{}", x)),
            FieldValue::Choice(c) => Some((*c).to_string()),
            FieldValue::Flag(true) => Some("Yes".to_string()),
            FieldValue::Flag(false) => Some("No".to_string()),
        }
    }
}

pub const GENDER_VALUES: &[&str] = &["M", "F"];
pub const OBESITY_STATUS_VALUES: &[&str] = &["Underweight", "Normal", "Overweight", "Obese"];
pub const SMOKING_HISTORY_VALUES: &[&str] = &["never", "former", "current", "ever", "not current", "No Info"];
pub const DIETARY_HABITS_VALUES: &[&str] = &["Healthy", "High-sugar", "High-energy", "Low-fiber", "Mixed"];
pub const ALCOHOL_USE_VALUES: &[&str] = &["None", "Moderate", "Heavy"];

impl ProfileField {
    pub const ALL: [ProfileField; 17] = [
        ProfileField::Age,
        ProfileField::Gender,
        ProfileField::Bmi,
        ProfileField::ObesityStatus,
        ProfileField::Hba1cLevel,
        ProfileField::BloodGlucoseLevel,
        ProfileField::HdlCholesterol,
        ProfileField::Triglycerides,
        ProfileField::SleepHours,
        ProfileField::SmokingHistory,
        ProfileField::DietaryHabits,
        ProfileField::AlcoholUse,
        ProfileField::Hypertension,
        ProfileField::HeartDisease,
        ProfileField::PhysicalInactivity,
        ProfileField::Prediabetes,
        ProfileField::HighBloodPressure,
    ];

    /// Name on the wire and in the scoring payload
    pub fn name(self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::Bmi => "bmi",
            ProfileField::ObesityStatus => "obesity_status",
            ProfileField::Hba1cLevel => "HbA1c_level",
            ProfileField::BloodGlucoseLevel => "blood_glucose_level",
            ProfileField::HdlCholesterol => "hdl_cholesterol",
            ProfileField::Triglycerides => "triglycerides",
            ProfileField::SleepHours => "sleep_hours",
            ProfileField::SmokingHistory => "smoking_history",
            ProfileField::DietaryHabits => "dietary_habits",
            ProfileField::AlcoholUse => "alcohol_use",
            ProfileField::Hypertension => "hypertension",
            ProfileField::HeartDisease => "heart_disease",
            ProfileField::PhysicalInactivity => "physical_inactivity",
            ProfileField::Prediabetes => "prediabetes",
            ProfileField::HighBloodPressure => "high_blood_pressure",
        }
    }

    /// Form label
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Age => "Age",
            ProfileField::Gender => "Gender",
            ProfileField::Bmi => "BMI",
            ProfileField::ObesityStatus => "Obesity Status",
            ProfileField::Hba1cLevel => "HbA1c Level",
            ProfileField::BloodGlucoseLevel => "Blood Glucose Level",
            ProfileField::HdlCholesterol => "HDL Cholesterol",
            ProfileField::Triglycerides => "Triglycerides",
            ProfileField::SleepHours => "Sleep Hours",
            ProfileField::SmokingHistory => "Smoking History",
            ProfileField::DietaryHabits => "Dietary Habits",
            ProfileField::AlcoholUse => "Alcohol Use",
            ProfileField::Hypertension => "Hypertension",
            ProfileField::HeartDisease => "Heart Disease",
            ProfileField::PhysicalInactivity => "Physical Inactivity",
            ProfileField::Prediabetes => "Prediabetes",
            ProfileField::HighBloodPressure => "High Blood Pressure",
        }
    }

    /// Short description, as published by the scoring service
    pub fn description(self) -> &'static str {
        match self {
            ProfileField::Age => "Age in years",
            ProfileField::Gender => "Gender (M = male, F = female)",
            ProfileField::Bmi => "Body Mass Index",
            ProfileField::ObesityStatus => "Obesity status",
            ProfileField::Hba1cLevel => "HbA1c level",
            ProfileField::BloodGlucoseLevel => "Blood glucose level",
            ProfileField::HdlCholesterol => "HDL Cholesterol",
            ProfileField::Triglycerides => "Triglycerides level",
            ProfileField::SleepHours => "Average sleep hours per night",
            ProfileField::SmokingHistory => "Smoking history",
            ProfileField::DietaryHabits => "Dietary habits",
            ProfileField::AlcoholUse => "Alcohol consumption",
            ProfileField::Hypertension => "Hypertension status",
            ProfileField::HeartDisease => "Heart disease status",
            ProfileField::PhysicalInactivity => "Physical inactivity (0 active, 1 inactive)",
            ProfileField::Prediabetes => "Prediabetes status",
            ProfileField::HighBloodPressure => "High blood pressure",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            ProfileField::Age => FieldKind::Integer { min: 0, max: 120 },
            ProfileField::Gender => FieldKind::Choice(GENDER_VALUES),
            ProfileField::Bmi => FieldKind::Decimal { min: 10.0, max: 60.0 },
            ProfileField::ObesityStatus => FieldKind::Choice(OBESITY_STATUS_VALUES),
            ProfileField::Hba1cLevel => FieldKind::Decimal { min: 3.0, max: 10.0 },
            ProfileField::BloodGlucoseLevel => FieldKind::Integer { min: 50, max: 300 },
            ProfileField::HdlCholesterol => FieldKind::Decimal { min: 10.0, max: 100.0 },
            ProfileField::Triglycerides => FieldKind::Decimal { min: 50.0, max: 300.0 },
            ProfileField::SleepHours => FieldKind::Decimal { min: 0.0, max: 12.0 },
            ProfileField::SmokingHistory => FieldKind::Choice(SMOKING_HISTORY_VALUES),
            ProfileField::DietaryHabits => FieldKind::Choice(DIETARY_HABITS_VALUES),
            ProfileField::AlcoholUse => FieldKind::Choice(ALCOHOL_USE_VALUES),
            ProfileField::Hypertension
            | ProfileField::HeartDisease
            | ProfileField::PhysicalInactivity
            | ProfileField::Prediabetes
            | ProfileField::HighBloodPressure => FieldKind::Flag,
        }
    }

    /// Inclusive numeric range, for numeric fields only
    pub fn range(self) -> Option<(f64, f64)> {
        match self.kind() {
            FieldKind::Integer { min, max } => Some((min as f64, max as f64)),
            FieldKind::Decimal { min, max } => Some((min, max)),
            _ => None,
        }
    }

    /// Look a field up by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::health_profile::{AlcoholUse, ChoiceField, DietaryHabits, Gender, ObesityStatus, SmokingHistory};

    fn literals<T: ChoiceField>() -> Vec<&'static str> {
        T::ALL.iter().map(|v| v.as_str()).collect()
    }

    #[test]
    fn test_choice_literals_match_enums() {
        assert_eq!(literals::<Gender>(), GENDER_VALUES);
        assert_eq!(literals::<ObesityStatus>(), OBESITY_STATUS_VALUES);
        assert_eq!(literals::<SmokingHistory>(), SMOKING_HISTORY_VALUES);
        assert_eq!(literals::<DietaryHabits>(), DIETARY_HABITS_VALUES);
        assert_eq!(literals::<AlcoholUse>(), ALCOHOL_USE_VALUES);
    }

    #[test]
    fn test_from_name_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::from_name(field.name()), Some(field));
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
        assert_eq!(ProfileField::from_name("hba1c_level"), None);
        assert_eq!(ProfileField::from_name("weight"), None);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(ProfileField::Age.range(), Some((0.0, 120.0)));
        assert_eq!(ProfileField::SleepHours.range(), Some((0.0, 12.0)));
        assert_eq!(ProfileField::Gender.range(), None);
        assert_eq!(ProfileField::Prediabetes.kind(), FieldKind::Flag);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Flag(true).display().as_deref(), Some("Yes"));
        assert_eq!(FieldValue::Decimal(27.5).display().as_deref(), Some("27.5"));
        assert_eq!(FieldValue::Unset.display(), None);
    }
}
