//! Tests for error handling functionality
//!
//! These tests verify that the error system in the SDK works correctly.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::error::{mapping, ErrorContext, ServiceError};

    #[test]
    fn test_service_error_creation() {
        let network_err = ServiceError::network("Connection failed");
        let auth_err = ServiceError::authentication("Invalid credentials");
        let rate_limit_err = ServiceError::rate_limit("Too many requests");

        assert_eq!(network_err.to_string(), "Network error: Connection failed");
        assert_eq!(auth_err.to_string(), "Authentication error: Invalid credentials");
        assert_eq!(rate_limit_err.to_string(), "Rate limit exceeded: Too many requests");

        assert!(!network_err.is_rate_limited());
        assert!(!auth_err.is_rate_limited());
        assert!(rate_limit_err.is_rate_limited());

        assert!(auth_err.is_unauthorized());
        assert!(!network_err.is_unauthorized());
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::for_service("openai")
            .status_code(503)
            .error_code("server_error")
            .endpoint("chat/completions")
            .with("attempt", 3);

        let err = ServiceError::service("Overloaded").with_context(context);

        assert_eq!(err.service_name(), Some("openai".to_string()));
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.error_code(), Some("server_error".to_string()));
        assert_eq!(err.message(), "Overloaded");
        assert_eq!(err.to_string(), "Service error: Overloaded");

        // Outer layers without a status still expose the inner one
        let wrapped = err.with_context_value("attempts", 2);
        assert_eq!(wrapped.status_code(), Some(503));
        assert!(matches!(wrapped.root(), ServiceError::Service(_)));
    }

    #[test]
    fn test_rate_limit_detected_through_context() {
        let err = ServiceError::service("slow down")
            .with_context(ErrorContext::for_service("openai").status_code(429));
        assert!(err.is_rate_limited());

        let err = ServiceError::authorization("You exceeded your current quota");
        assert!(err.is_rate_limited());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_openai_error_mapping() {
        let mut context = ErrorContext::new();
        let body = json!({
            "error": {
                "message": "Invalid API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        });
        let err = mapping::map_openai_error(StatusCode::UNAUTHORIZED, &body, &mut context);
        assert!(matches!(err, ServiceError::Authentication(_)));
        assert_eq!(context.service, "openai");
        assert_eq!(context.error_code.as_deref(), Some("invalid_api_key"));

        let mut context = ErrorContext::new();
        let body = json!({"error": {"message": "The model `gpt-9` does not exist", "code": "model_not_found"}});
        let err = mapping::map_openai_error(StatusCode::NOT_FOUND, &body, &mut context);
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_insufficient_quota_is_rate_limit() {
        let mut context = ErrorContext::new();
        let body = json!({
            "error": {
                "message": "You exceeded your current quota, please check your plan and billing details.",
                "type": "insufficient_quota",
                "code": "insufficient_quota"
            }
        });
        // Some gateways send quota exhaustion with 403 rather than 429
        let err = mapping::map_openai_error(StatusCode::FORBIDDEN, &body, &mut context);
        assert!(matches!(err, ServiceError::RateLimit(_)));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_http_error_mapping_without_json() {
        let mut context = ErrorContext::for_service("openai");
        let err = mapping::map_http_error(StatusCode::BAD_GATEWAY, "upstream hiccup", &mut context);
        assert!(matches!(err, ServiceError::Service(_)));
        assert!(err.to_string().contains("upstream hiccup"));

        let mut context = ErrorContext::for_service("openai");
        let err = mapping::map_http_error(StatusCode::TOO_MANY_REQUESTS, "", &mut context);
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ServiceError = parse_err.into();
        assert!(matches!(err.root(), ServiceError::Parsing(_)));
        assert_eq!(err.service_name(), Some("json".to_string()));
    }
}
