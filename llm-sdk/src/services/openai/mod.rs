//! OpenAI API client implementation
//!
//! This module provides a strongly-typed client for OpenAI-compatible APIs,
//! covering chat completions (free text or schema-constrained) and moderation.

mod models;
pub use models::*;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{OpenAIConfig, ServiceConfig};
use crate::core::{
    Completion, CompletionRequest, CompletionService, ModerationService, ServiceClient, TokenUsage,
};
use crate::error::{Result, ServiceError};
use crate::services::common::{build_http_client, parse_error_response, UserAgent};
use crate::util::sanitize_for_logging;

/// OpenAI API client
///
/// Every call is a single HTTP round trip; retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Create a client from the environment
    pub fn from_env() -> Result<Self> {
        Self::new_with_config(OpenAIConfig::from_env()?)
    }

    /// Create a new OpenAI client with custom configuration
    pub fn new_with_config(config: OpenAIConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("openai-client".to_string()),
                ..UserAgent::default()
            }),
            Some(config.timeout),
        )?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a new builder for the OpenAI client
    pub fn builder() -> OpenAIClientBuilder {
        OpenAIClientBuilder::default()
    }

    /// Client configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Send a chat completion request
    pub async fn chat_completion(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        self.post("chat/completions", request).await
    }

    /// Send a moderation request
    pub async fn moderation(&self, request: &ModerationRequest) -> Result<ModerationResponse> {
        self.post("moderations", request).await
    }

    /// Translate a transport-independent request into the chat wire format
    pub fn to_chat_request(request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage::system(&request.system_instruction),
                ChatMessage::user(&request.user_message),
            ],
            temperature: Some(request.temperature),
            max_tokens: Some(request.max_output_tokens),
            response_format: request.response_schema.as_ref().map(|schema| {
                ResponseFormat::JsonSchema {
                    json_schema: JsonSchemaFormat {
                        name: schema.name.clone(),
                        schema: schema.schema.clone(),
                    },
                }
            }),
        }
    }

    async fn post<T, R>(&self, endpoint: &str, request: &T) -> Result<R>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.config.normalized_base_url(), endpoint);
        debug!("Sending request to OpenAI: POST {}", url);

        let mut builder = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request);

        if let Some(ref org) = self.config.org_id {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder.send().await.map_err(ServiceError::from)?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<R>()
                .await
                .map_err(|e| ServiceError::parsing(format!("Failed to parse response: {}", e)))
        } else {
            let error = parse_error_response("openai", endpoint, response).await;
            warn!(
                "OpenAI {} returned {}: {}",
                endpoint,
                status.as_u16(),
                sanitize_for_logging(&error.to_string())
            );
            Err(error)
        }
    }
}

impl ServiceClient for OpenAIClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let chat_request = Self::to_chat_request(request);
        debug!(
            "Completion request: model={}, structured={}, prompt_chars={}",
            request.model,
            request.response_schema.is_some(),
            request.user_message.chars().count()
        );

        let response = self.chat_completion(&chat_request).await?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(u) = usage {
            debug!(
                "Token usage for {}: prompt={}, completion={}, total={}",
                request.model, u.prompt_tokens, u.completion_tokens, u.total_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::parsing("No completion choices returned"))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(ServiceError::parsing(format!("Model refused: {}", refusal)));
        }

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ServiceError::parsing("Empty completion response"))?;

        Ok(Completion {
            content,
            model: Some(response.model).filter(|m| !m.is_empty()),
            finish_reason: choice.finish_reason,
            usage,
        })
    }
}

#[async_trait]
impl ModerationService for OpenAIClient {
    async fn flagged(&self, text: &str) -> Result<bool> {
        let request = ModerationRequest {
            model: self.config.moderation_model.clone(),
            input: text.to_string(),
        };

        let response = self.moderation(&request).await?;
        response
            .results
            .first()
            .map(|r| r.flagged)
            .ok_or_else(|| ServiceError::parsing("No moderation results returned"))
    }
}

/// Builder for OpenAI client
#[derive(Default)]
pub struct OpenAIClientBuilder {
    /// API key for authentication
    api_key: Option<String>,

    /// Organization ID
    org_id: Option<String>,

    /// Base URL for the API
    base_url: Option<String>,

    /// Request timeout
    timeout_seconds: Option<u64>,

    /// Moderation model
    moderation_model: Option<String>,
}

impl OpenAIClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the organization ID
    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Set the moderation model
    pub fn moderation_model(mut self, model: impl Into<String>) -> Self {
        self.moderation_model = Some(model.into());
        self
    }

    /// Build the OpenAI client
    pub fn build(self) -> Result<OpenAIClient> {
        let mut config = OpenAIConfig::default();

        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }

        if let Some(org_id) = self.org_id {
            config.org_id = Some(org_id);
        }

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(timeout) = self.timeout_seconds {
            config.timeout = std::time::Duration::from_secs(timeout);
        }

        if let Some(model) = self.moderation_model {
            config.moderation_model = model;
        }

        OpenAIClient::new_with_config(config)
    }
}
