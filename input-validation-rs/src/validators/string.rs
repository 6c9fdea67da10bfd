//! String validators
//!
//! This module provides validators for string inputs.

use crate::errors::{ValidationError, ValidationResult};

/// Validate that a string is not empty or whitespace only
pub fn not_blank(field: &str, s: &str) -> ValidationResult<()> {
    if s.trim().is_empty() {
        Err(ValidationError::TooShort(field.to_string()))
    } else {
        Ok(())
    }
}

/// Validate that a string does not exceed a maximum length (in characters)
pub fn max_length(field: &str, s: &str, max: usize) -> ValidationResult<()> {
    if s.chars().count() > max {
        Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate a free-text user input: non-blank and bounded
pub fn user_text(field: &str, s: &str) -> ValidationResult<()> {
    not_blank(field, s)?;
    max_length(field, s, crate::DEFAULT_MAX_STRING_LENGTH)
}
