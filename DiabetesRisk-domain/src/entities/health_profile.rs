use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::fields::{FieldKind, FieldValue, ProfileField};

/// Errors raised when assigning a value to a profile field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Numeric value outside the field's declared range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Literal that is not one of the field's declared values
    #[error("'{value}' is not a valid value for {field}")]
    UnknownChoice { field: &'static str, value: String },

    /// Value of the wrong kind for the field
    #[error("{field} does not accept {kind} values")]
    KindMismatch {
        field: &'static str,
        kind: &'static str,
    },
}

/// Categorical field with a fixed set of literal values
pub trait ChoiceField: Sized + Copy + 'static {
    /// Every variant, in display order
    const ALL: &'static [Self];

    /// Literal string sent to the scoring service
    fn as_str(self) -> &'static str;

    /// Match a literal exactly, then ignoring ASCII case
    fn from_literal(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == raw)
            .or_else(|| Self::ALL.iter().copied().find(|v| v.as_str().eq_ignore_ascii_case(raw)))
    }
}

macro_rules! impl_choice_traits {
    ($ty:ty, $field:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ProfileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ChoiceField>::from_literal(s).ok_or_else(|| ProfileError::UnknownChoice {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

/// Gender as recorded by the scoring dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl ChoiceField for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl_choice_traits!(Gender, "gender");

/// Weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum ObesityStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl ChoiceField for ObesityStatus {
    const ALL: &'static [Self] = &[
        ObesityStatus::Underweight,
        ObesityStatus::Normal,
        ObesityStatus::Overweight,
        ObesityStatus::Obese,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ObesityStatus::Underweight => "Underweight",
            ObesityStatus::Normal => "Normal",
            ObesityStatus::Overweight => "Overweight",
            ObesityStatus::Obese => "Obese",
        }
    }
}

impl_choice_traits!(ObesityStatus, "obesity_status");

/// Smoking history categories used by the scoring dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum SmokingHistory {
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "former")]
    Former,
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "ever")]
    Ever,
    #[serde(rename = "not current")]
    NotCurrent,
    #[serde(rename = "No Info")]
    NoInfo,
}

impl ChoiceField for SmokingHistory {
    const ALL: &'static [Self] = &[
        SmokingHistory::Never,
        SmokingHistory::Former,
        SmokingHistory::Current,
        SmokingHistory::Ever,
        SmokingHistory::NotCurrent,
        SmokingHistory::NoInfo,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SmokingHistory::Never => "never",
            SmokingHistory::Former => "former",
            SmokingHistory::Current => "current",
            SmokingHistory::Ever => "ever",
            SmokingHistory::NotCurrent => "not current",
            SmokingHistory::NoInfo => "No Info",
        }
    }
}

impl_choice_traits!(SmokingHistory, "smoking_history");

/// Dominant dietary pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum DietaryHabits {
    Healthy,
    #[serde(rename = "High-sugar")]
    HighSugar,
    #[serde(rename = "High-energy")]
    HighEnergy,
    #[serde(rename = "Low-fiber")]
    LowFiber,
    Mixed,
}

impl ChoiceField for DietaryHabits {
    const ALL: &'static [Self] = &[
        DietaryHabits::Healthy,
        DietaryHabits::HighSugar,
        DietaryHabits::HighEnergy,
        DietaryHabits::LowFiber,
        DietaryHabits::Mixed,
    ];

    fn as_str(self) -> &'static str {
        match self {
            DietaryHabits::Healthy => "Healthy",
            DietaryHabits::HighSugar => "High-sugar",
            DietaryHabits::HighEnergy => "High-energy",
            DietaryHabits::LowFiber => "Low-fiber",
            DietaryHabits::Mixed => "Mixed",
        }
    }
}

impl_choice_traits!(DietaryHabits, "dietary_habits");

/// Alcohol consumption level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum AlcoholUse {
    None,
    Moderate,
    Heavy,
}

impl ChoiceField for AlcoholUse {
    const ALL: &'static [Self] = &[AlcoholUse::None, AlcoholUse::Moderate, AlcoholUse::Heavy];

    fn as_str(self) -> &'static str {
        match self {
            AlcoholUse::None => "None",
            AlcoholUse::Moderate => "Moderate",
            AlcoholUse::Heavy => "Heavy",
        }
    }
}

impl_choice_traits!(AlcoholUse, "alcohol_use");

/// Health attributes accumulated by the assessment wizard
///
/// Numeric and categorical fields start unset; the five condition flags start
/// at 0. Every setter validates its input: a rejected value leaves the field
/// unset rather than keeping a stale or clamped value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthProfile {
    /// Age in years
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    age: Option<u32>,

    /// Gender
    gender: Option<Gender>,

    /// Body mass index
    #[validate(range(min = 10.0, max = 60.0, message = "BMI must be between 10 and 60"))]
    bmi: Option<f64>,

    /// Weight category
    obesity_status: Option<ObesityStatus>,

    /// Glycated haemoglobin level
    #[serde(rename = "HbA1c_level")]
    #[validate(range(min = 3.0, max = 10.0, message = "HbA1c level must be between 3 and 10"))]
    hba1c_level: Option<f64>,

    /// Blood glucose level in mg/dL
    #[validate(range(min = 50, max = 300, message = "Blood glucose level must be between 50 and 300"))]
    blood_glucose_level: Option<u32>,

    /// HDL cholesterol
    #[validate(range(min = 10.0, max = 100.0, message = "HDL cholesterol must be between 10 and 100"))]
    hdl_cholesterol: Option<f64>,

    /// Triglycerides level
    #[validate(range(min = 50.0, max = 300.0, message = "Triglycerides must be between 50 and 300"))]
    triglycerides: Option<f64>,

    /// Average sleep hours per night
    #[validate(range(min = 0.0, max = 12.0, message = "Sleep hours must be between 0 and 12"))]
    sleep_hours: Option<f64>,

    /// Smoking history
    smoking_history: Option<SmokingHistory>,

    /// Dietary habits
    dietary_habits: Option<DietaryHabits>,

    /// Alcohol use
    alcohol_use: Option<AlcoholUse>,

    #[serde(default)]
    hypertension: bool,

    #[serde(default)]
    heart_disease: bool,

    #[serde(default)]
    physical_inactivity: bool,

    #[serde(default)]
    prediabetes: bool,

    #[serde(default)]
    high_blood_pressure: bool,
}

/// Check an optional numeric value against the field's declared range
fn check_range<T>(field: ProfileField, value: Option<T>) -> Result<Option<T>, ProfileError>
where
    T: Copy + Into<f64>,
{
    let Some(v) = value else {
        return Ok(None);
    };

    let (min, max) = match field.kind() {
        FieldKind::Integer { min, max } => (min as f64, max as f64),
        FieldKind::Decimal { min, max } => (min, max),
        FieldKind::Choice(_) => return Err(ProfileError::KindMismatch { field: field.name(), kind: "numeric" }),
        FieldKind::Flag => return Err(ProfileError::KindMismatch { field: field.name(), kind: "numeric" }),
    };

    let as_f64: f64 = v.into();
    if as_f64.is_finite() && as_f64 >= min && as_f64 <= max {
        Ok(Some(v))
    } else {
        Err(ProfileError::OutOfRange {
            field: field.name(),
            min,
            max,
            value: as_f64,
        })
    }
}

impl HealthProfile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn set_age(&mut self, age: Option<u32>) -> Result<(), ProfileError> {
        self.age = None;
        self.age = check_range(ProfileField::Age, age)?;
        Ok(())
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
    }

    pub fn bmi(&self) -> Option<f64> {
        self.bmi
    }

    pub fn set_bmi(&mut self, bmi: Option<f64>) -> Result<(), ProfileError> {
        self.bmi = None;
        self.bmi = check_range(ProfileField::Bmi, bmi)?;
        Ok(())
    }

    pub fn obesity_status(&self) -> Option<ObesityStatus> {
        self.obesity_status
    }

    pub fn set_obesity_status(&mut self, status: Option<ObesityStatus>) {
        self.obesity_status = status;
    }

    pub fn hba1c_level(&self) -> Option<f64> {
        self.hba1c_level
    }

    pub fn set_hba1c_level(&mut self, level: Option<f64>) -> Result<(), ProfileError> {
        self.hba1c_level = None;
        self.hba1c_level = check_range(ProfileField::Hba1cLevel, level)?;
        Ok(())
    }

    pub fn blood_glucose_level(&self) -> Option<u32> {
        self.blood_glucose_level
    }

    pub fn set_blood_glucose_level(&mut self, level: Option<u32>) -> Result<(), ProfileError> {
        self.blood_glucose_level = None;
        self.blood_glucose_level = check_range(ProfileField::BloodGlucoseLevel, level)?;
        Ok(())
    }

    pub fn hdl_cholesterol(&self) -> Option<f64> {
        self.hdl_cholesterol
    }

    pub fn set_hdl_cholesterol(&mut self, level: Option<f64>) -> Result<(), ProfileError> {
        self.hdl_cholesterol = None;
        self.hdl_cholesterol = check_range(ProfileField::HdlCholesterol, level)?;
        Ok(())
    }

    pub fn triglycerides(&self) -> Option<f64> {
        self.triglycerides
    }

    pub fn set_triglycerides(&mut self, level: Option<f64>) -> Result<(), ProfileError> {
        self.triglycerides = None;
        self.triglycerides = check_range(ProfileField::Triglycerides, level)?;
        Ok(())
    }

    pub fn sleep_hours(&self) -> Option<f64> {
        self.sleep_hours
    }

    pub fn set_sleep_hours(&mut self, hours: Option<f64>) -> Result<(), ProfileError> {
        self.sleep_hours = None;
        self.sleep_hours = check_range(ProfileField::SleepHours, hours)?;
        Ok(())
    }

    pub fn smoking_history(&self) -> Option<SmokingHistory> {
        self.smoking_history
    }

    pub fn set_smoking_history(&mut self, history: Option<SmokingHistory>) {
        self.smoking_history = history;
    }

    pub fn dietary_habits(&self) -> Option<DietaryHabits> {
        self.dietary_habits
    }

    pub fn set_dietary_habits(&mut self, habits: Option<DietaryHabits>) {
        self.dietary_habits = habits;
    }

    pub fn alcohol_use(&self) -> Option<AlcoholUse> {
        self.alcohol_use
    }

    pub fn set_alcohol_use(&mut self, alcohol: Option<AlcoholUse>) {
        self.alcohol_use = alcohol;
    }

    pub fn hypertension(&self) -> bool {
        self.hypertension
    }

    pub fn set_hypertension(&mut self, value: bool) {
        self.hypertension = value;
    }

    pub fn heart_disease(&self) -> bool {
        self.heart_disease
    }

    pub fn set_heart_disease(&mut self, value: bool) {
        self.heart_disease = value;
    }

    pub fn physical_inactivity(&self) -> bool {
        self.physical_inactivity
    }

    pub fn set_physical_inactivity(&mut self, value: bool) {
        self.physical_inactivity = value;
    }

    pub fn prediabetes(&self) -> bool {
        self.prediabetes
    }

    pub fn set_prediabetes(&mut self, value: bool) {
        self.prediabetes = value;
    }

    pub fn high_blood_pressure(&self) -> bool {
        self.high_blood_pressure
    }

    pub fn set_high_blood_pressure(&mut self, value: bool) {
        self.high_blood_pressure = value;
    }

    /// Current value of a field as a kind-tagged value
    pub fn get(&self, field: ProfileField) -> FieldValue {
        fn choice<T: ChoiceField>(v: Option<T>) -> FieldValue {
            v.map(|c| FieldValue::Choice(c.as_str())).unwrap_or(FieldValue::Unset)
        }
        fn decimal(v: Option<f64>) -> FieldValue {
            v.map(FieldValue::Decimal).unwrap_or(FieldValue::Unset)
        }
        fn integer(v: Option<u32>) -> FieldValue {
            v.map(|n| FieldValue::Integer(i64::from(n))).unwrap_or(FieldValue::Unset)
        }

        match field {
            ProfileField::Age => integer(self.age),
            ProfileField::Gender => choice(self.gender),
            ProfileField::Bmi => decimal(self.bmi),
            ProfileField::ObesityStatus => choice(self.obesity_status),
            ProfileField::Hba1cLevel => decimal(self.hba1c_level),
            ProfileField::BloodGlucoseLevel => integer(self.blood_glucose_level),
            ProfileField::HdlCholesterol => decimal(self.hdl_cholesterol),
            ProfileField::Triglycerides => decimal(self.triglycerides),
            ProfileField::SleepHours => decimal(self.sleep_hours),
            ProfileField::SmokingHistory => choice(self.smoking_history),
            ProfileField::DietaryHabits => choice(self.dietary_habits),
            ProfileField::AlcoholUse => choice(self.alcohol_use),
            ProfileField::Hypertension => FieldValue::Flag(self.hypertension),
            ProfileField::HeartDisease => FieldValue::Flag(self.heart_disease),
            ProfileField::PhysicalInactivity => FieldValue::Flag(self.physical_inactivity),
            ProfileField::Prediabetes => FieldValue::Flag(self.prediabetes),
            ProfileField::HighBloodPressure => FieldValue::Flag(self.high_blood_pressure),
        }
    }

    /// Whether the field currently holds a value
    pub fn is_set(&self, field: ProfileField) -> bool {
        !matches!(self.get(field), FieldValue::Unset)
    }

    /// Assign a coerced value to a field through its typed setter
    ///
    /// `Unset` clears the field (flags go back to 0). On error the field is
    /// left unset.
    pub fn apply(&mut self, field: ProfileField, value: FieldValue) -> Result<(), ProfileError> {
        match (field.kind(), value) {
            (FieldKind::Flag, FieldValue::Flag(flag)) => {
                self.set_flag(field, flag);
                Ok(())
            }
            (FieldKind::Flag, FieldValue::Unset) => {
                self.set_flag(field, false);
                Ok(())
            }
            (FieldKind::Integer { .. }, FieldValue::Integer(n)) => {
                let checked = match u32::try_from(n) {
                    Ok(n) => Some(n),
                    Err(_) => {
                        self.clear(field);
                        let (min, max) = field.range().unwrap_or((0.0, 0.0));
                        return Err(ProfileError::OutOfRange { field: field.name(), min, max, value: n as f64 });
                    }
                };
                self.set_integer(field, checked)
            }
            (FieldKind::Integer { .. }, FieldValue::Unset) => self.set_integer(field, None),
            (FieldKind::Decimal { .. }, FieldValue::Decimal(x)) => self.set_decimal(field, Some(x)),
            (FieldKind::Decimal { .. }, FieldValue::Integer(n)) => self.set_decimal(field, Some(n as f64)),
            (FieldKind::Decimal { .. }, FieldValue::Unset) => self.set_decimal(field, None),
            (FieldKind::Choice(_), FieldValue::Choice(literal)) => self.set_choice(field, Some(literal)),
            (FieldKind::Choice(_), FieldValue::Unset) => self.set_choice(field, None),
            (_, other) => {
                self.clear(field);
                Err(ProfileError::KindMismatch {
                    field: field.name(),
                    kind: other.kind_name(),
                })
            }
        }
    }

    fn clear(&mut self, field: ProfileField) {
        // Clearing never fails
        let _ = self.apply(field, FieldValue::Unset);
    }

    fn set_flag(&mut self, field: ProfileField, flag: bool) {
        match field {
            ProfileField::Hypertension => self.set_hypertension(flag),
            ProfileField::HeartDisease => self.set_heart_disease(flag),
            ProfileField::PhysicalInactivity => self.set_physical_inactivity(flag),
            ProfileField::Prediabetes => self.set_prediabetes(flag),
            ProfileField::HighBloodPressure => self.set_high_blood_pressure(flag),
            _ => {}
        }
    }

    fn set_integer(&mut self, field: ProfileField, value: Option<u32>) -> Result<(), ProfileError> {
        match field {
            ProfileField::Age => self.set_age(value),
            ProfileField::BloodGlucoseLevel => self.set_blood_glucose_level(value),
            _ => Err(ProfileError::KindMismatch { field: field.name(), kind: "integer" }),
        }
    }

    fn set_decimal(&mut self, field: ProfileField, value: Option<f64>) -> Result<(), ProfileError> {
        match field {
            ProfileField::Bmi => self.set_bmi(value),
            ProfileField::Hba1cLevel => self.set_hba1c_level(value),
            ProfileField::HdlCholesterol => self.set_hdl_cholesterol(value),
            ProfileField::Triglycerides => self.set_triglycerides(value),
            ProfileField::SleepHours => self.set_sleep_hours(value),
            _ => Err(ProfileError::KindMismatch { field: field.name(), kind: "decimal" }),
        }
    }

    fn set_choice(&mut self, field: ProfileField, literal: Option<&str>) -> Result<(), ProfileError> {
        fn parse<T: ChoiceField + FromStr<Err = ProfileError>>(literal: Option<&str>) -> Result<Option<T>, ProfileError> {
            literal.map(|s| s.parse::<T>()).transpose()
        }

        match field {
            ProfileField::Gender => {
                self.gender = None;
                self.gender = parse(literal)?;
            }
            ProfileField::ObesityStatus => {
                self.obesity_status = None;
                self.obesity_status = parse(literal)?;
            }
            ProfileField::SmokingHistory => {
                self.smoking_history = None;
                self.smoking_history = parse(literal)?;
            }
            ProfileField::DietaryHabits => {
                self.dietary_habits = None;
                self.dietary_habits = parse(literal)?;
            }
            ProfileField::AlcoholUse => {
                self.alcohol_use = None;
                self.alcohol_use = parse(literal)?;
            }
            _ => return Err(ProfileError::KindMismatch { field: field.name(), kind: "choice" }),
        }
        Ok(())
    }
}
