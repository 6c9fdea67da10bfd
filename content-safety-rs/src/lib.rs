//! Content moderation for user-supplied text.
//!
//! [`ContentModerator::is_safe`] never fails: with a moderation backend it
//! returns the negation of the backend's `flagged` verdict and treats backend
//! errors as safe; without one it falls back to a case-insensitive denylist.

use std::sync::Arc;

use thiserror::Error;

pub mod denylist;
pub mod moderator;

pub use denylist::{Denylist, DEFAULT_TERMS};
pub use moderator::{ContentModerator, ModerationVerdict, VerdictSource};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModerationError {
    #[error("Invalid denylist: {0}")]
    InvalidDenylist(String),
}

/// Build a moderator from the environment
///
/// With a usable credential the OpenAI moderation endpoint is the backend;
/// otherwise the moderator runs in degraded mode over `MODERATION_DENYLIST`.
pub fn moderator_from_env() -> Result<ContentModerator, ModerationError> {
    match llm_sdk::openai_client() {
        Ok(client) => {
            log::info!("Content moderation using backend {}", llm_sdk::ServiceClient::name(&client));
            Ok(ContentModerator::with_backend(Arc::new(client)))
        }
        Err(e) => {
            log::info!("Content moderation in degraded mode: {}", e);
            Ok(ContentModerator::degraded(Denylist::from_env()?))
        }
    }
}
