//! Error mapping for OpenAI-compatible APIs
//!
//! This module provides mapping functions to convert upstream error
//! responses to our normalized ServiceError type.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};

/// Check whether an upstream message or code refers to exhausted quota
pub fn mentions_quota(text: &str) -> bool {
    text.to_ascii_lowercase().contains("quota")
}

/// Map a status code and message to the matching error category
fn map_status(status: StatusCode, message: String, quota: bool) -> ServiceError {
    if quota {
        return ServiceError::rate_limit(message);
    }

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ServiceError::validation(message),
        StatusCode::UNAUTHORIZED => ServiceError::authentication(message),
        StatusCode::FORBIDDEN => ServiceError::authorization(message),
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::timeout(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limit(message),
        _ => ServiceError::service(message),
    }
}

/// Map an OpenAI API error to a ServiceError
///
/// OpenAI reports exhausted credit as `insufficient_quota`; that is treated
/// the same as HTTP 429 whatever status it arrives with.
pub fn map_openai_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "openai".to_string();

    let error = json.get("error").unwrap_or(json);

    if let Some(error_type) = error.get("type").and_then(|t| t.as_str()) {
        context.add("error_type", error_type);
    }

    if let Some(code) = error.get("code").and_then(|c| c.as_str()) {
        context.error_code = Some(code.to_string());
    }

    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| json.get("error").and_then(|e| e.as_str()))
        .unwrap_or("Unknown OpenAI error")
        .to_string();

    let quota = mentions_quota(&message)
        || context.error_code.as_deref().map(mentions_quota).unwrap_or(false)
        || error
            .get("type")
            .and_then(|t| t.as_str())
            .map(mentions_quota)
            .unwrap_or(false);

    map_status(status, message, quota)
}

/// Map a generic HTTP error to a ServiceError
pub fn map_http_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if json.is_object() {
            return map_openai_error(status, &json, context);
        }
    }

    // Fallback to status-based mapping
    let message = if body.is_empty() {
        status.to_string()
    } else if body.chars().count() > 100 {
        format!("{}: {}...", status, body.chars().take(100).collect::<String>())
    } else {
        format!("{}: {}", status, body)
    };

    let quota = mentions_quota(body);
    map_status(status, message, quota)
}
