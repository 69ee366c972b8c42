//! Normalization of raw form input into typed field values
//!
//! Coercion never fails: anything that cannot be read as the field's declared
//! kind becomes [`FieldValue::Unset`]. Range checks are left to the profile
//! setters so that an out-of-range number is rejected rather than clamped.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use crate::entities::fields::{FieldKind, FieldValue, ProfileField};

/// A raw input event as delivered by a form control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum RawInput {
    /// Checkbox state
    Bool(bool),
    /// Already-numeric input
    Number(f64),
    /// Text typed or selected by the user
    Text(String),
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<bool> for RawInput {
    fn from(value: bool) -> Self {
        RawInput::Bool(value)
    }
}

/// Coerce a raw input for the given field
pub fn coerce(field: ProfileField, raw: &RawInput) -> FieldValue {
    let value = match field.kind() {
        FieldKind::Integer { .. } => number(raw).and_then(integral).map(FieldValue::Integer),
        FieldKind::Decimal { .. } => number(raw).map(FieldValue::Decimal),
        FieldKind::Choice(values) => choice(values, raw).map(FieldValue::Choice),
        FieldKind::Flag => flag(raw).map(FieldValue::Flag),
    };

    value.unwrap_or_else(|| {
        if !is_blank(raw) {
            debug!("Could not coerce {:?} for {}, leaving it unset", raw, field);
        }
        FieldValue::Unset
    })
}

fn is_blank(raw: &RawInput) -> bool {
    matches!(raw, RawInput::Text(text) if text.trim().is_empty())
}

fn number(raw: &RawInput) -> Option<f64> {
    let parsed = match raw {
        RawInput::Number(n) => *n,
        RawInput::Text(text) => text.trim().parse::<f64>().ok()?,
        RawInput::Bool(_) => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn integral(value: f64) -> Option<i64> {
    // Reject fractions instead of rounding; bound to what i64 holds exactly
    if value.fract() != 0.0 || value.abs() > 9_007_199_254_740_992.0 {
        return None;
    }
    Some(value as i64)
}

fn choice(values: &'static [&'static str], raw: &RawInput) -> Option<&'static str> {
    let RawInput::Text(text) = raw else {
        return None;
    };
    let text = text.trim();
    values
        .iter()
        .copied()
        .find(|v| *v == text)
        .or_else(|| values.iter().copied().find(|v| v.eq_ignore_ascii_case(text)))
}

fn flag(raw: &RawInput) -> Option<bool> {
    match raw {
        RawInput::Bool(b) => Some(*b),
        RawInput::Number(n) if *n == 0.0 => Some(false),
        RawInput::Number(n) if *n == 1.0 => Some(true),
        RawInput::Number(_) => None,
        RawInput::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        },
    }
}
