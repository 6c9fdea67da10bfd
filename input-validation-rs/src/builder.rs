//! Validation builder pattern
//!
//! This module provides a fluent API for building and composing validation rules
//! against a single named field.

use crate::errors::{ValidationError, ValidationResult};
use crate::validators;

/// Builder for chaining validation rules
#[derive(Debug, Clone)]
pub struct ValidationBuilder<T> {
    /// Field path reported in errors
    field: String,
    /// The value being validated
    value: T,
    /// First error encountered during validation
    error: Option<ValidationError>,
}

impl<T> ValidationBuilder<T> {
    /// Create a new validation builder for a named field
    pub fn new(field: impl Into<String>, value: T) -> Self {
        Self {
            field: field.into(),
            value,
            error: None,
        }
    }

    /// Apply a validation function; only the first failure is kept
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: FnOnce(&str, &T) -> ValidationResult<()>,
    {
        if self.error.is_none() {
            if let Err(err) = validator(&self.field, &self.value) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Finish validation and return the result
    pub fn finish(self) -> ValidationResult<T> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    /// Get the error (if any)
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

impl<S: AsRef<str>> ValidationBuilder<S> {
    /// Validate that a string is not blank
    pub fn not_blank(self) -> Self {
        self.validate(|field, s| validators::not_blank(field, s.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_passes() {
        let result = ValidationBuilder::new("name", "Alex")
            .not_blank()
            .validate(|field, s| validators::max_length(field, s, 10))
            .finish();
        assert_eq!(result, Ok("Alex"));
    }

    #[test]
    fn test_first_error_wins() {
        let builder = ValidationBuilder::new("name", "")
            .not_blank()
            .validate(|field, s| validators::max_length(field, s, 0));
        assert_eq!(
            builder.error(),
            Some(&ValidationError::TooShort("name".to_string()))
        );
    }

    #[test]
    fn test_custom_rule() {
        let result = ValidationBuilder::new("months", 7u32)
            .validate(|field, m| {
                if (1..=6).contains(m) {
                    Ok(())
                } else {
                    Err(ValidationError::OutOfRange {
                        field: field.to_string(),
                        message: format!("{} not in 1..=6", m),
                    })
                }
            })
            .finish();
        assert!(result.is_err());
    }
}
