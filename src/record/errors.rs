//! Record validation errors
//!
//! Every variant maps to the `ValidationError` category of the HTTP
//! contract (status 400), whichever line of defense raised it.

use thiserror::Error;

/// Result type for record validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Candidate record data that violates the field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body could not be parsed as JSON at all
    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    /// Body parsed but is not a JSON object
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Field absent, null, empty, or (for age) zero
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    /// Field present with the wrong JSON type
    #[error("field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Text field is whitespace only
    #[error("field '{0}' must not be blank")]
    Blank(&'static str),

    /// Age outside the inclusive range
    #[error("field 'age': expected an integer between {min} and {max}, got {actual}")]
    AgeOutOfRange { actual: i64, min: i64, max: i64 },
}

impl ValidationError {
    /// Human-readable sentence for the response envelope.
    pub fn summary(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please provide all fields (name, age, class)",
            ValidationError::MalformedBody(_) | ValidationError::NotAnObject(_) => {
                "Request body must be a JSON object with name, age and class"
            }
            ValidationError::TypeMismatch { .. } => "Record fields have the wrong type",
            ValidationError::Blank(_) => "Name and class must not be blank",
            ValidationError::AgeOutOfRange { .. } => "Age must be between 1 and 100",
        }
    }

    /// The offending field, when one is known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(f) | ValidationError::Blank(f) => Some(f),
            ValidationError::TypeMismatch { field, .. } => Some(field),
            ValidationError::AgeOutOfRange { .. } => Some("age"),
            ValidationError::MalformedBody(_) | ValidationError::NotAnObject(_) => None,
        }
    }
}
