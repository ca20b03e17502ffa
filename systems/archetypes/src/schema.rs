//! JSON Schema validation of the archetype document.
//!
//! The whole document is checked against `letters.schema.json` before any
//! record is deserialized, so every problem in the batch is reported at once.

use std::fmt;

use jsonschema::{error::ValidationErrorKind, ValidationError};
use serde_json::Value;

use crate::ArchetypeError;

/// Schema every archetype document must satisfy.
pub const LETTERS_SCHEMA: &str = include_str!("../data/letters.schema.json");

/// Single schema violation inside the archetype data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    /// Position of the offending record, absent for document-level problems.
    pub index: Option<usize>,
    /// JSON key that failed validation.
    pub field: String,
    /// Human readable reason.
    pub reason: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "/{index}/{} {}", self.field, self.reason),
            None => write!(f, "(root) {}", self.reason),
        }
    }
}

/// Validates `document` against [`LETTERS_SCHEMA`].
///
/// Violations are sorted by record index and field name.
pub(crate) fn validate(document: &Value) -> Result<(), ArchetypeError> {
    let schema: Value = serde_json::from_str(LETTERS_SCHEMA)?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|error| ArchetypeError::InvalidSchema(error.to_string()))?;

    let mut violations: Vec<FieldViolation> =
        validator.iter_errors(document).map(violation).collect();
    if violations.is_empty() {
        return Ok(());
    }
    violations.sort_by(|a, b| (a.index, &a.field).cmp(&(b.index, &b.field)));
    Err(ArchetypeError::Schema { violations })
}

fn violation(error: ValidationError<'_>) -> FieldViolation {
    let path = error.instance_path.to_string();
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let index = segments.next().and_then(|segment| segment.parse::<usize>().ok());
    let nested = segments.next().map(str::to_owned);

    let (field, reason) = match &error.kind {
        ValidationErrorKind::Required { property } => (
            property.as_str().map_or_else(|| property.to_string(), str::to_owned),
            "is required".to_owned(),
        ),
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            unexpected.join(", "),
            "is not an allowed property".to_owned(),
        ),
        _ => (nested.unwrap_or_default(), error.to_string()),
    };
    FieldViolation {
        index,
        field,
        reason,
    }
}
