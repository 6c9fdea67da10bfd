//! # Input Validation Library
//!
//! Reusable validation utilities for structured documents and user input.
//! Every failure carries the path of the offending field, so a caller walking
//! a nested document can stop at the first violation and report it precisely.
//!
//! ## Features
//!
//! - Validators for strings, URLs and collections
//! - Path helpers for nested fields (`timeline[2].tasks`)
//! - A fluent builder for composing rules on a single field

mod builder;
mod errors;
pub mod validators;

pub use builder::ValidationBuilder;
pub use errors::{child_path, index_path, ValidationError, ValidationResult};

/// Re-export commonly used validators for convenience
pub mod prelude {
    pub use crate::builder::ValidationBuilder;
    pub use crate::errors::{child_path, index_path, ValidationError, ValidationResult};
    pub use crate::validators;
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum allowed length for user-supplied strings
pub const DEFAULT_MAX_STRING_LENGTH: usize = 500;

/// Validate a single field with default settings
pub fn validate<T>(field: impl Into<String>, input: T) -> ValidationBuilder<T> {
    ValidationBuilder::new(field, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Alex", true ; "plain name")]
    #[test_case("", false ; "empty")]
    #[test_case("  \t", false ; "whitespace")]
    fn test_validate_entry_point(input: &str, ok: bool) {
        assert_eq!(validate("name", input).not_blank().finish().is_ok(), ok);
    }
}
