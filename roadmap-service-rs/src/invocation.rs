//! Model invocation: one model, one request shape, retries on rate limiting
//!
//! Each candidate model carries a static capability flag choosing between a
//! schema-constrained request and a free-text request whose first balanced
//! JSON object is extracted. Only the upstream call is retried; a response
//! that parses but fails validation is reported straight back so the
//! generator can move on to the next model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use llm_sdk::{
    extract_json_object, CompletionRequest, CompletionService, ResponseSchema, RetryConfig,
    RetryExecutor,
};
use log::{debug, info, warn};
use serde_json::Value;

use crate::error::AttemptError;
use crate::model::{RoadmapContent, RoadmapRequest};
use crate::{prompt, schema};

/// Output tokens requested from free-text models
pub const FREE_TEXT_MAX_TOKENS: u32 = 2500;

/// Output tokens requested from structured-output models
pub const STRUCTURED_MAX_TOKENS: u32 = 4000;

/// Model prefixes that accept a declared JSON schema
const STRUCTURED_MODEL_PREFIXES: &[&str] = &["gpt-4o", "gpt-4.1", "gpt-5", "o1", "o3", "o4"];

/// How a request is shaped for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStrategy {
    /// Declare the roadmap schema; the response body is the JSON document
    StructuredRequest,
    /// Describe the shape in the prompt and extract JSON from free text
    FreeTextRequest,
}

impl RequestStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStrategy::StructuredRequest => "structured",
            RequestStrategy::FreeTextRequest => "free_text",
        }
    }
}

impl fmt::Display for RequestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" | "schema" => Ok(RequestStrategy::StructuredRequest),
            "free_text" | "freetext" | "text" => Ok(RequestStrategy::FreeTextRequest),
            other => Err(format!("unknown request strategy '{}'", other)),
        }
    }
}

/// A candidate model and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProfile {
    pub id: String,
    pub strategy: RequestStrategy,
    pub max_output_tokens: u32,
}

impl ModelProfile {
    pub fn structured(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            strategy: RequestStrategy::StructuredRequest,
            max_output_tokens: STRUCTURED_MAX_TOKENS,
        }
    }

    pub fn free_text(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            strategy: RequestStrategy::FreeTextRequest,
            max_output_tokens: FREE_TEXT_MAX_TOKENS,
        }
    }

    /// Profile from the static capability table
    pub fn infer(id: impl Into<String>) -> Self {
        let id = id.into();
        if STRUCTURED_MODEL_PREFIXES.iter().any(|p| id.starts_with(p)) {
            Self::structured(id)
        } else {
            Self::free_text(id)
        }
    }

    /// Default ordered candidates, cheapest first
    pub fn defaults() -> Vec<ModelProfile> {
        vec![
            Self::free_text("gpt-3.5-turbo"),
            Self::structured("gpt-4o-mini"),
            Self::structured("gpt-4o"),
        ]
    }
}

impl FromStr for ModelProfile {
    type Err = String;

    /// Parse `model` or `model:strategy`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, strategy) = match s.split_once(':') {
            Some((id, strategy)) => (id.trim(), Some(strategy.parse::<RequestStrategy>()?)),
            None => (s.trim(), None),
        };

        if id.is_empty() {
            return Err(format!("empty model id in '{}'", s));
        }

        Ok(match strategy {
            Some(RequestStrategy::StructuredRequest) => Self::structured(id),
            Some(RequestStrategy::FreeTextRequest) => Self::free_text(id),
            None => Self::infer(id),
        })
    }
}

/// Issues completion requests for roadmap generation
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn CompletionService>,
    retry: RetryExecutor,
    temperature: f32,
}

impl fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("retry", self.retry.config())
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ModelInvoker {
    pub fn new(backend: Arc<dyn CompletionService>, retry: RetryConfig, temperature: f32) -> Self {
        Self {
            backend,
            retry: RetryExecutor::new(retry),
            temperature,
        }
    }

    /// Completion request for `profile`
    pub fn build_request(&self, request: &RoadmapRequest, profile: &ModelProfile) -> CompletionRequest {
        let completion = CompletionRequest::new(
            profile.id.clone(),
            prompt::ROADMAP_SYSTEM_INSTRUCTION,
            prompt::roadmap_user_message(request, profile.strategy),
        )
        .max_output_tokens(profile.max_output_tokens)
        .temperature(self.temperature);

        match profile.strategy {
            RequestStrategy::StructuredRequest => completion.response_schema(ResponseSchema {
                name: schema::SCHEMA_NAME.to_string(),
                schema: schema::roadmap_json_schema(),
            }),
            RequestStrategy::FreeTextRequest => completion,
        }
    }

    /// Generate roadmap content with one model
    ///
    /// Rate-limit signals are retried per the retry policy; everything else
    /// returns after the first failure.
    pub async fn attempt_generation(
        &self,
        request: &RoadmapRequest,
        profile: &ModelProfile,
    ) -> Result<RoadmapContent, AttemptError> {
        let completion_request = self.build_request(request, profile);
        info!("Requesting roadmap from {} ({} request)", profile.id, profile.strategy);

        let completion = self
            .retry
            .execute(|| self.backend.complete(&completion_request))
            .await
            .map_err(|e| AttemptError::from_service(&profile.id, &e))?;

        if let Some(usage) = completion.usage {
            info!("Roadmap request to {} completed. Used {} tokens", profile.id, usage.total_tokens);
        }

        let content = parse_content(&completion.content, profile)?;
        debug!(
            "{} produced a valid roadmap: {} skills, {} courses",
            profile.id,
            content.skills.len(),
            content.courses.len()
        );
        Ok(content)
    }
}

/// Parse and validate the body of a completion
pub fn parse_content(text: &str, profile: &ModelProfile) -> Result<RoadmapContent, AttemptError> {
    let json = match profile.strategy {
        RequestStrategy::StructuredRequest => text.trim(),
        RequestStrategy::FreeTextRequest => extract_json_object(text).ok_or_else(|| {
            AttemptError::malformed(&profile.id, "no JSON object found in response")
        })?,
    };

    let value: Value = serde_json::from_str(json).map_err(|e| {
        AttemptError::malformed(&profile.id, format!("response is not valid JSON: {}", e))
    })?;

    schema::validate_content(&value).map_err(|e| {
        warn!("{} returned a roadmap that failed validation: {}", profile.id, e);
        AttemptError::malformed(&profile.id, format!("schema validation failed: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttemptErrorKind;
    use crate::mock;

    fn valid_json() -> String {
        serde_json::to_string(&mock::mock_content("software engineer")).unwrap()
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("gpt-4o".parse::<ModelProfile>().unwrap(), ModelProfile::structured("gpt-4o"));
        assert_eq!(
            "gpt-3.5-turbo".parse::<ModelProfile>().unwrap(),
            ModelProfile::free_text("gpt-3.5-turbo")
        );
        assert_eq!(
            "local-llama:structured".parse::<ModelProfile>().unwrap(),
            ModelProfile::structured("local-llama")
        );
        assert_eq!(
            " gpt-4o : free_text".parse::<ModelProfile>().unwrap().strategy,
            RequestStrategy::FreeTextRequest
        );
        assert!("gpt-4o:json".parse::<ModelProfile>().is_err());
        assert!(":structured".parse::<ModelProfile>().is_err());
    }

    #[test]
    fn test_defaults_cheapest_first() {
        let ids: Vec<String> = ModelProfile::defaults().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["gpt-3.5-turbo", "gpt-4o-mini", "gpt-4o"]);
    }

    #[test]
    fn test_free_text_extraction() {
        let text = format!("Here is your roadmap:\n```json\n{}\n```\nGood luck!", valid_json());
        let content = parse_content(&text, &ModelProfile::free_text("m")).unwrap();
        assert_eq!(content.timeline.len(), 6);
    }

    #[test]
    fn test_structured_body_must_be_pure_json() {
        let text = format!("Sure! {}", valid_json());
        let err = parse_content(&text, &ModelProfile::structured("m")).unwrap_err();
        assert_eq!(err.kind, AttemptErrorKind::MalformedResponse);
        assert!(parse_content(&valid_json(), &ModelProfile::structured("m")).is_ok());
    }

    #[test]
    fn test_invalid_roadmap_is_malformed() {
        let err = parse_content("{\"career\": {}}", &ModelProfile::free_text("m")).unwrap_err();
        assert_eq!(err.kind, AttemptErrorKind::MalformedResponse);
        assert!(err.message.contains("career.title"));

        let err = parse_content("no json here", &ModelProfile::free_text("m")).unwrap_err();
        assert_eq!(err.kind, AttemptErrorKind::MalformedResponse);
    }
}
