//! Error handling for the validation library
//!
//! Every error names the field path that failed (e.g. `timeline[2].tasks`)
//! so callers can report the first violation without further context.

use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Enum representing different validation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is absent or null
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A field is present but has the wrong JSON type
    #[error("Invalid type at {field}: expected {expected}")]
    InvalidType { field: String, expected: String },

    /// A string field is empty or blank
    #[error("Field must not be empty: {0}")]
    TooShort(String),

    /// A string field exceeds its maximum length
    #[error("Field {field} exceeds maximum length of {max}")]
    TooLong { field: String, max: usize },

    /// A collection has the wrong number of elements
    #[error("Field {field} has {actual} elements, expected between {min} and {max}")]
    CountOutOfRange {
        field: String,
        actual: usize,
        min: usize,
        max: usize,
    },

    /// A number lies outside its permitted range
    #[error("Value of {field} is outside allowed range: {message}")]
    OutOfRange { field: String, message: String },

    /// A string is not one of the permitted enumeration values
    #[error("Invalid value '{value}' at {field}; allowed: {allowed}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: String,
    },

    /// A URL-typed field does not parse as a URL
    #[error("Invalid URL at {field}: {message}")]
    InvalidUrl { field: String, message: String },

    /// A value that must be unique appears more than once
    #[error("Duplicate value {value} at {field}")]
    DuplicateValue { field: String, value: String },

    /// A value that must appear in a set is absent
    #[error("Field {field} is missing value {value}")]
    MissingValue { field: String, value: String },

    /// Generic validation error
    #[error("{0}")]
    Generic(String),
}

impl ValidationError {
    /// Create a new generic validation error with a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        ValidationError::Generic(message.into())
    }

    /// Create a type mismatch error
    pub fn invalid_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError::InvalidType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// The field path this error refers to, when it has one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field) | ValidationError::TooShort(field) => Some(field),
            ValidationError::InvalidType { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::CountOutOfRange { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidEnumValue { field, .. }
            | ValidationError::InvalidUrl { field, .. }
            | ValidationError::DuplicateValue { field, .. }
            | ValidationError::MissingValue { field, .. } => Some(field),
            ValidationError::Generic(_) => None,
        }
    }
}

/// Join a parent path and a child key (`career` + `title` -> `career.title`)
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Build an indexed path (`skills` + 3 -> `skills[3]`)
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let err = ValidationError::new("Test error");
        assert!(matches!(err, ValidationError::Generic(_)));
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "Test error");
    }

    #[test]
    fn test_error_names_field() {
        let err = ValidationError::CountOutOfRange {
            field: "skills".to_string(),
            actual: 3,
            min: 12,
            max: 16,
        };
        assert_eq!(err.field(), Some("skills"));
        assert_eq!(
            err.to_string(),
            "Field skills has 3 elements, expected between 12 and 16"
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(child_path("", "career"), "career");
        assert_eq!(child_path("career", "title"), "career.title");
        assert_eq!(index_path("timeline", 2), "timeline[2]");
        assert_eq!(child_path(&index_path("timeline", 2), "tasks"), "timeline[2].tasks");
    }
}
