// Validation outcomes

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Name of the field the rule is attached to
    pub property: String,

    pub message: String,
}

impl ValidationError {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.message)
    }
}

/// Every message produced for one field, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub property: String,
    pub errors: Vec<String>,
}

/// Outcome of one `validate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff no field produced an error
    pub is_valid: bool,

    /// One entry per failing field, in declaration order
    pub errors: Vec<FieldErrors>,
}

impl ValidationResult {
    /// A passing result with no errors.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from per-field messages, dropping fields without any.
    pub fn from_field_errors(errors: Vec<FieldErrors>) -> Self {
        let errors: Vec<FieldErrors> = errors.into_iter().filter(|e| !e.errors.is_empty()).collect();
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Messages recorded for `property`, if it failed.
    pub fn errors_for(&self, property: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|e| e.property == property)
            .map(|e| e.errors.as_slice())
    }

    /// Total number of messages across all fields.
    pub fn error_count(&self) -> usize {
        self.errors.iter().map(|e| e.errors.len()).sum()
    }

    /// Flatten back into one `ValidationError` per message.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        self.errors
            .iter()
            .flat_map(|field| {
                field
                    .errors
                    .iter()
                    .map(|message| ValidationError::new(field.property.clone(), message.clone()))
            })
            .collect()
    }

    /// `Ok(())` when valid, otherwise the failing fields as an error.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }

    /// JSON rendering for handlers that report failures to clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "isValid": self.is_valid,
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "property": e.property,
                    "errors": e.errors,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// Error form of a failed [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<FieldErrors>,
}

impl ValidationErrors {
    pub fn new(fields: Vec<FieldErrors>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages for a specific field.
    pub fn get_field_errors(&self, property: &str) -> &[String] {
        self.fields
            .iter()
            .find(|e| e.property == property)
            .map(|e| e.errors.as_slice())
            .unwrap_or(&[])
    }

    /// One `property: message` line per message.
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|f| f.errors.iter().map(move |m| format!("{}: {}", f.property, m)))
            .collect()
    }
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_field_errors(errors.fields)
    }
}
