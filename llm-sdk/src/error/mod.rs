//! Error handling for the LLM SDK
//!
//! This module provides the error system shared by the completion and
//! moderation clients:
//! - Categorizes errors by type (network, auth, rate limit, etc.)
//! - Adds rich context to errors for better debugging
//! - Maps upstream error payloads to normalized formats
//! - Provides convenient Result type alias

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub mod mapping;

/// Result type for LLM SDK operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the LLM SDK
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network or connection errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Authentication errors (missing or rejected credential)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization errors (permission issues)
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Rate limiting or quota exhaustion
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Resource (usually a model) not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream service errors
    #[error("Service error: {0}")]
    Service(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller abandoned the operation
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Errors with additional context
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

impl ServiceError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        ServiceError::Authentication(message.into())
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        ServiceError::Authorization(message.into())
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>) -> Self {
        ServiceError::RateLimit(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    /// Create a service-specific error
    pub fn service(message: impl Into<String>) -> Self {
        ServiceError::Service(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    /// Create a cancellation error
    pub fn cancelled(message: impl Into<String>) -> Self {
        ServiceError::Cancelled(message.into())
    }

    /// Add context to an existing error
    ///
    /// Context already attached is kept; the new context wraps it.
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// Add a single context key/value to an existing error
    pub fn with_context_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        let mut context = ErrorContext::new();
        context.add(key, value);
        self.with_context(context)
    }

    /// The innermost error, looking through any context wrappers
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// The error message without the category prefix
    pub fn message(&self) -> &str {
        match self.root() {
            ServiceError::Network(m)
            | ServiceError::Timeout(m)
            | ServiceError::Authentication(m)
            | ServiceError::Authorization(m)
            | ServiceError::RateLimit(m)
            | ServiceError::Validation(m)
            | ServiceError::Parsing(m)
            | ServiceError::NotFound(m)
            | ServiceError::Service(m)
            | ServiceError::Configuration(m)
            | ServiceError::Cancelled(m) => m,
            ServiceError::WithContext { .. } => "",
        }
    }

    /// Value from the outermost context layer for which `f` yields one
    fn find_context<T>(&self, f: impl Fn(&ErrorContext) -> Option<T> + Copy) -> Option<T> {
        match self {
            ServiceError::WithContext { inner, context } => f(context).or_else(|| inner.find_context(f)),
            _ => None,
        }
    }

    /// Get the upstream error code if available
    pub fn error_code(&self) -> Option<String> {
        self.find_context(|c| c.error_code.clone())
    }

    /// Get the service name if available
    pub fn service_name(&self) -> Option<String> {
        self.find_context(|c| Some(c.service.clone()))
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        self.find_context(|c| c.status_code)
    }

    /// Check whether this error signals rate limiting or quota exhaustion
    ///
    /// True for `RateLimit`, for any error carrying HTTP 429, and for upstream
    /// codes or messages mentioning quota.
    pub fn is_rate_limited(&self) -> bool {
        if matches!(self.root(), ServiceError::RateLimit(_)) {
            return true;
        }
        if self.status_code() == Some(429) {
            return true;
        }
        if self
            .error_code()
            .map(|code| mapping::mentions_quota(&code))
            .unwrap_or(false)
        {
            return true;
        }
        matches!(self.root(), ServiceError::Service(_) | ServiceError::Authorization(_))
            && mapping::mentions_quota(self.message())
    }

    /// Check if the upstream rejected the credential or its permissions
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.root(),
            ServiceError::Authentication(_) | ServiceError::Authorization(_)
        ) && !self.is_rate_limited()
    }
}

/// Error context information
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Service that generated the error
    pub service: String,

    /// Time the error was observed
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// HTTP status code if applicable
    pub status_code: Option<u16>,

    /// Service-specific error code
    pub error_code: Option<String>,

    /// Endpoint that was called
    pub endpoint: Option<String>,

    /// Additional context data
    pub data: HashMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            service: "unknown".to_string(),
            timestamp: Some(chrono::Utc::now()),
            status_code: None,
            error_code: None,
            endpoint: None,
            data: HashMap::new(),
        }
    }
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new error context for a specific service
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// Add an HTTP status code
    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Add an error code
    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Add an endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add a context value
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.data.insert(key.into(), value.to_string());
    }

    /// Add a context value and return self (builder pattern)
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.add(key, value);
        self
    }
}

/// Convert reqwest errors to ServiceError
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let context = ErrorContext::for_service("http_client");

        let service_error = if err.is_timeout() {
            ServiceError::timeout(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ServiceError::network(format!("Connection error: {}", err))
        } else if err.is_builder() {
            ServiceError::validation(format!("Invalid request: {}", err))
        } else if err.is_redirect() {
            ServiceError::network(format!("Too many redirects: {}", err))
        } else if err.is_decode() {
            ServiceError::parsing(format!("Response decode error: {}", err))
        } else {
            ServiceError::network(format!("HTTP client error: {}", err))
        };

        if let Some(status) = err.status() {
            service_error.with_context(context.status_code(status.as_u16()))
        } else {
            service_error.with_context(context)
        }
    }
}

/// Convert serde_json errors to ServiceError
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(format!("JSON error: {}", err))
            .with_context(ErrorContext::for_service("json"))
    }
}
