// content-safety-rs/src/denylist.rs
// Degraded-mode screening: case-insensitive substring match against a
// short list of forbidden terms. Used when no moderation backend is configured.

use regex::{Regex, RegexBuilder};

use crate::ModerationError;

/// Terms screened when no list is configured
pub const DEFAULT_TERMS: &[&str] = &["spam", "abuse", "harmful"];

/// Compiled denylist
#[derive(Debug, Clone)]
pub struct Denylist {
    terms: Vec<String>,
    matcher: Option<Regex>,
}

impl Default for Denylist {
    fn default() -> Self {
        // The default terms are plain words, escaping cannot fail to compile
        Self::new(DEFAULT_TERMS.iter().copied()).unwrap_or_else(|_| Self::empty())
    }
}

impl Denylist {
    /// Build a denylist from terms; blank terms are dropped
    pub fn new<I, S>(terms: I) -> Result<Self, ModerationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self::empty());
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|e| ModerationError::InvalidDenylist(e.to_string()))?;

        Ok(Self {
            terms,
            matcher: Some(matcher),
        })
    }

    /// A denylist that matches nothing
    pub fn empty() -> Self {
        Self {
            terms: Vec::new(),
            matcher: None,
        }
    }

    /// Load terms from `MODERATION_DENYLIST` (comma separated)
    pub fn from_env() -> Result<Self, ModerationError> {
        Self::new(config_rs::get_env_list("MODERATION_DENYLIST", DEFAULT_TERMS))
    }

    /// The configured terms, lower-cased
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// First denylisted term contained in `text`, lower-cased
    pub fn find(&self, text: &str) -> Option<String> {
        self.matcher
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| m.as_str().to_lowercase())
    }

    /// True when `text` contains any term
    pub fn matches(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terms() {
        let list = Denylist::default();
        assert_eq!(list.terms(), &["spam", "abuse", "harmful"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let list = Denylist::default();
        assert_eq!(list.find("this is SPAM"), Some("spam".to_string()));
        assert!(list.matches("Substance Abuse counselor"));
        assert!(list.matches("spammer"));
        assert!(!list.matches("software engineer"));
    }

    #[test]
    fn test_terms_are_escaped() {
        let list = Denylist::new(["c++", "a.b"]).unwrap();
        assert!(list.matches("I write C++ daily"));
        assert!(!list.matches("axb"));
        assert!(list.matches("a.b"));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let list = Denylist::new(["  ", ""]).unwrap();
        assert!(list.terms().is_empty());
        assert!(!list.matches("spam"));
    }
}
