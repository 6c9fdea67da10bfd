//! Collection validators
//!
//! Bounds on sequence lengths and exact-set checks on indices.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::errors::{ValidationError, ValidationResult};

/// Validate that a collection length lies within `[min, max]`
pub fn length_between(field: &str, len: usize, min: usize, max: usize) -> ValidationResult<()> {
    if len < min || len > max {
        Err(ValidationError::CountOutOfRange {
            field: field.to_string(),
            actual: len,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate that `values` contains every element of `expected` exactly once and nothing else
///
/// Duplicates are reported first (in encounter order), then values outside the
/// expected set, then expected values that never appeared.
pub fn exact_set<T>(field: &str, values: &[T], expected: &[T]) -> ValidationResult<()>
where
    T: Ord + Display + Clone,
{
    let expected_set: BTreeSet<T> = expected.iter().cloned().collect();
    let mut seen = BTreeSet::new();

    for value in values {
        if !seen.insert(value.clone()) {
            return Err(ValidationError::DuplicateValue {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        if !expected_set.contains(value) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                message: format!("unexpected value {}", value),
            });
        }
    }

    if let Some(missing) = expected_set.difference(&seen).next() {
        return Err(ValidationError::MissingValue {
            field: field.to_string(),
            value: missing.to_string(),
        });
    }

    Ok(())
}

/// Validate that a sequence is strictly ascending
pub fn strictly_ascending<T>(field: &str, values: &[T]) -> ValidationResult<()>
where
    T: PartialOrd + Display,
{
    for pair in values.windows(2) {
        if pair[0] >= pair[1] {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                message: format!("{} does not follow {} in ascending order", pair[1], pair[0]),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_between() {
        assert!(length_between("skills", 12, 12, 16).is_ok());
        assert!(length_between("skills", 16, 12, 16).is_ok());
        assert!(length_between("skills", 11, 12, 16).is_err());
        assert!(length_between("skills", 17, 12, 16).is_err());
    }

    #[test]
    fn test_exact_set() {
        let expected = [1u32, 2, 3, 4, 5, 6];
        assert!(exact_set("months", &[1, 2, 3, 4, 5, 6], &expected).is_ok());
        assert!(exact_set("months", &[6, 5, 4, 3, 2, 1], &expected).is_ok());

        assert!(matches!(
            exact_set("months", &[1, 2, 2, 4, 5, 6], &expected),
            Err(ValidationError::DuplicateValue { .. })
        ));
        assert!(matches!(
            exact_set("months", &[1, 2, 3, 4, 5, 7], &expected),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            exact_set("months", &[1, 2, 3, 4, 5], &expected),
            Err(ValidationError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_strictly_ascending() {
        assert!(strictly_ascending("months", &[1, 2, 3]).is_ok());
        assert!(strictly_ascending("months", &[1, 3, 2]).is_err());
        assert!(strictly_ascending::<u32>("months", &[]).is_ok());
    }
}
