//! URL validators
//!
//! This module provides validators for URL inputs, ensuring links handed to
//! users are syntactically valid and use a web scheme.

use crate::errors::{ValidationError, ValidationResult};
use url::Url;

/// Schemes accepted for user-facing links
pub const WEB_SCHEMES: &[&str] = &["http", "https"];

/// Validate that a string is a valid URL
pub fn is_url(field: &str, s: &str) -> ValidationResult<Url> {
    Url::parse(s.trim()).map_err(|e| ValidationError::InvalidUrl {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Validate that a URL uses an allowed protocol/scheme
pub fn allowed_protocol(field: &str, s: &str, allowed: &[&str]) -> ValidationResult<()> {
    let url = is_url(field, s)?;
    let scheme = url.scheme();
    if allowed.contains(&scheme) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl {
            field: field.to_string(),
            message: format!(
                "URL uses disallowed protocol '{}'. Allowed protocols: {:?}",
                scheme, allowed
            ),
        })
    }
}

/// Validate that a URL is an http(s) link with a host
pub fn is_web_url(field: &str, s: &str) -> ValidationResult<()> {
    allowed_protocol(field, s, WEB_SCHEMES)?;
    let url = is_url(field, s)?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            field: field.to_string(),
            message: "URL has no host component".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("url", "https://www.coursera.org").is_ok());
        assert!(is_url("url", "not a url").is_err());
    }

    #[test]
    fn test_allowed_protocol() {
        assert!(allowed_protocol("url", "https://example.com", WEB_SCHEMES).is_ok());
        assert!(allowed_protocol("url", "ftp://example.com", WEB_SCHEMES).is_err());
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("courses[0].url", "https://www.linkedin.com/learning").is_ok());
        assert!(is_web_url("courses[0].url", "javascript:alert(1)").is_err());
        let err = is_web_url("courses[0].url", "www.udemy.com").unwrap_err();
        assert_eq!(err.field(), Some("courses[0].url"));
    }
}
