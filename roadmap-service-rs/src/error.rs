//! Error types for roadmap generation
//!
//! `AttemptError` describes why one model failed and is absorbed by the
//! generator. `RoadmapError` is what reaches the caller: only contract
//! violations and request-construction defects, never upstream quality issues.

use std::fmt;

use input_validation_rs::ValidationError;
use llm_sdk::ServiceError;
use thiserror::Error;

/// Classification of a failed model attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptErrorKind {
    /// 429 or quota signal that outlived the retry budget
    RateLimited,
    /// Response could not be parsed or failed schema validation
    MalformedResponse,
    /// Network failure, timeout or upstream 5xx
    Transport,
    /// Credential rejected (401/403 without a quota signal)
    Unauthorized,
    /// Model unknown to the upstream or request shape unsupported (400/404)
    ModelUnavailable,
    /// The request could not be constructed locally
    InvalidRequest,
    /// Caller cancellation or deadline
    Cancelled,
}

impl AttemptErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptErrorKind::RateLimited => "rate_limited",
            AttemptErrorKind::MalformedResponse => "malformed_response",
            AttemptErrorKind::Transport => "transport",
            AttemptErrorKind::Unauthorized => "unauthorized",
            AttemptErrorKind::ModelUnavailable => "model_unavailable",
            AttemptErrorKind::InvalidRequest => "invalid_request",
            AttemptErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AttemptErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single model attempt (including its retries)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{model} failed ({kind}): {message}")]
pub struct AttemptError {
    pub kind: AttemptErrorKind,
    pub model: String,
    pub message: String,
}

impl AttemptError {
    pub fn new(kind: AttemptErrorKind, model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            message: message.into(),
        }
    }

    pub fn malformed(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(AttemptErrorKind::MalformedResponse, model, message)
    }

    pub fn cancelled(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(AttemptErrorKind::Cancelled, model, reason)
    }

    /// Classify an upstream error
    ///
    /// Rate limiting wins over every other signal, so a 403 carrying
    /// `insufficient_quota` is `RateLimited`, not `Unauthorized`.
    pub fn from_service(model: impl Into<String>, error: &ServiceError) -> Self {
        let kind = if error.is_rate_limited() {
            AttemptErrorKind::RateLimited
        } else if error.is_unauthorized() {
            AttemptErrorKind::Unauthorized
        } else {
            match error.root() {
                ServiceError::NotFound(_) => AttemptErrorKind::ModelUnavailable,
                ServiceError::Validation(_) if error.status_code().is_some() => {
                    AttemptErrorKind::ModelUnavailable
                }
                ServiceError::Validation(_) | ServiceError::Configuration(_) => {
                    AttemptErrorKind::InvalidRequest
                }
                ServiceError::Parsing(_) => AttemptErrorKind::MalformedResponse,
                ServiceError::Cancelled(_) => AttemptErrorKind::Cancelled,
                _ => AttemptErrorKind::Transport,
            }
        };

        Self::new(kind, model, error.message())
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind == AttemptErrorKind::RateLimited
    }
}

/// Errors surfaced to callers of the roadmap service
#[derive(Error, Debug)]
pub enum RoadmapError {
    /// The caller supplied input that violates the request contract
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The completion request could not be built; never masked by a fallback
    #[error("Unrecoverable request error: {0}")]
    UnrecoverableRequest(String),

    /// Configuration present but unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Advice or skill-gap analysis failed for a reason other than rate limiting
    #[error("Career advice unavailable: {0}")]
    AdviceUnavailable(#[source] ServiceError),
}

impl From<AttemptError> for RoadmapError {
    fn from(error: AttemptError) -> Self {
        RoadmapError::UnrecoverableRequest(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoadmapError>;
