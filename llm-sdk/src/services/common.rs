//! Common utilities for service clients
//!
//! This module provides shared functionality for all service clients.

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client};

use crate::error::{ErrorContext, Result, ServiceError};

/// UserAgent structure for identifying the client to upstream services
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "career-roadmap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("llm-sdk".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build a standard HTTP client with default settings
pub fn build_http_client(user_agent: Option<UserAgent>, timeout: Option<Duration>) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| ServiceError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout.unwrap_or_else(|| Duration::from_secs(60)))
        .build()
        .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Create error context for HTTP requests
pub fn create_error_context(
    service_name: &str,
    endpoint: &str,
    status: Option<reqwest::StatusCode>,
) -> ErrorContext {
    let mut context = ErrorContext::for_service(service_name).endpoint(endpoint);

    if let Some(status_code) = status {
        context = context.status_code(status_code.as_u16());
    }

    context
}

/// Parse error response from HTTP response
pub async fn parse_error_response(
    service_name: &str,
    endpoint: &str,
    response: reqwest::Response,
) -> ServiceError {
    let status = response.status();
    let mut context = create_error_context(service_name, endpoint, Some(status));

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("Failed to read error response: {}", e),
    };

    crate::error::mapping::map_http_error(status, &body, &mut context).with_context(context)
}
