//! Shared form plumbing: field-level error collection and enumerated choices.
//!
//! Every submitted form goes through a pure `validate_*` function that either
//! yields a validated value or a [`FieldErrors`] map keyed by field name.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;
use validator::ValidationErrors;

use crate::error::ParseChoiceError;

/// Message used for any missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field name -> list of human-readable messages.
///
/// Serializes as a plain JSON object so clients can annotate each input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(&field, message);
            }
        }
        out
    }
}

/// A `(value, label)` pair offered to clients for building select inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// A closed set of string-backed values (category, condition, status).
pub trait Choices: Copy + Sized + 'static {
    /// Name used in error messages, e.g. `"category"`.
    const KIND: &'static str;
    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;
    fn label(self) -> &'static str;

    fn choices() -> Vec<Choice> {
        Self::ALL
            .iter()
            .map(|c| Choice {
                value: c.as_str(),
                label: c.label(),
            })
            .collect()
    }

    /// Exact, case-sensitive lookup of a stored value.
    fn parse_choice(value: &str) -> Result<Self, ParseChoiceError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| ParseChoiceError {
                kind: Self::KIND,
                value: value.to_string(),
            })
    }
}

/// Derive `FromStr`, `TryFrom<String>` and `Display` from a [`Choices`] impl.
macro_rules! impl_choice_conversions {
    ($ty:ty) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::form::Choices>::parse_choice(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::error::ParseChoiceError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                <Self as $crate::form::Choices>::parse_choice(&value)
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::form::Choices>::as_str(*self))
            }
        }
    };
}

pub(crate) use impl_choice_conversions;

/// Parse an optional choice field, recording an error for unknown values.
///
/// A `None` input records nothing: required-ness is checked separately.
pub fn parse_choice_field<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<T>
where
    T: Choices + FromStr,
{
    let value = value?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(
                field,
                format!("Select a valid choice. {value} is not one of the available choices."),
            );
            None
        }
    }
}

/// Trim a submitted text value, treating blank input as absent.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
