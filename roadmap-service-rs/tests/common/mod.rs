//! Shared fixtures for roadmap-service integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use llm_sdk::{Completion, CompletionRequest, CompletionService, ErrorContext, RetryConfig, ServiceError};
use mockall::mock;

use roadmap_service_rs::mock::mock_content;
use roadmap_service_rs::{ModelProfile, RoadmapConfig};

mock! {
    pub Backend {}

    #[async_trait]
    impl CompletionService for Backend {
        async fn complete(&self, request: &CompletionRequest) -> llm_sdk::Result<Completion>;
    }
}

/// Title used by model-generated fixtures so they differ from the mock
pub const MODEL_TITLE: &str = "Site Reliability Engineer";

/// Config with millisecond retry delays
pub fn fast_config(models: Vec<ModelProfile>) -> RoadmapConfig {
    RoadmapConfig {
        models,
        retry: RetryConfig {
            initial_interval: Duration::from_millis(5),
            max_interval: Duration::from_millis(20),
            ..RetryConfig::default()
        },
        advice_retry: RetryConfig {
            initial_interval: Duration::from_millis(5),
            max_interval: Duration::from_millis(20),
            ..RetryConfig::default()
        },
        ..RoadmapConfig::default()
    }
}

/// Three models: one free-text, two structured
pub fn three_models() -> Vec<ModelProfile> {
    vec![
        ModelProfile::free_text("model-a"),
        ModelProfile::structured("model-b"),
        ModelProfile::structured("model-c"),
    ]
}

/// A schema-valid roadmap body as a model would return it
pub fn valid_body() -> String {
    let mut content = mock_content("site reliability");
    content.career.title = MODEL_TITLE.to_string();
    serde_json::to_string(&content).expect("serialize fixture")
}

/// Valid JSON that breaks the skill-count invariant
pub fn short_skills_body() -> String {
    let mut content = mock_content("site reliability");
    content.skills.truncate(5);
    serde_json::to_string(&content).expect("serialize fixture")
}

pub fn ok_body() -> llm_sdk::Result<Completion> {
    Ok(Completion::text(valid_body()))
}

pub fn with_status(error: ServiceError, status: u16) -> ServiceError {
    error.with_context(ErrorContext::for_service("openai").status_code(status))
}

pub fn rate_limited() -> ServiceError {
    with_status(ServiceError::rate_limit("Rate limit reached for requests"), 429)
}

pub fn backend(mock: MockBackend) -> Option<Arc<dyn CompletionService>> {
    let backend: Arc<dyn CompletionService> = Arc::new(mock);
    Some(backend)
}
