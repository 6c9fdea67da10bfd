//! Core abstractions for the LLM SDK
//!
//! This module provides the trait interfaces that service clients implement
//! and that callers depend on:
//!
//! - `ServiceClient`: identity of a configured upstream client
//! - `CompletionService`: one chat-completion round trip
//! - `ModerationService`: one moderation verdict
//!
//! Callers hold these behind `Arc<dyn ...>` so tests can substitute mocks.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Base trait for all service clients
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier
    fn name(&self) -> &str;

    /// The base URL for the service
    fn base_url(&self) -> &str;
}

/// A JSON schema the model is asked to conform to
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    /// Schema name reported to the upstream
    pub name: String,
    /// JSON schema document
    pub schema: Value,
}

/// A single completion request, independent of wire format
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// System instruction describing the assistant's role
    pub system_instruction: String,
    /// The user message
    pub user_message: String,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Schema for structured output; `None` requests free text
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    /// Create a free-text request with default sampling
    pub fn new(
        model: impl Into<String>,
        system_instruction: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
            max_output_tokens: 1024,
            temperature: 0.7,
            response_schema: None,
        }
    }

    /// Set the output token limit
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request schema-constrained output
    pub fn response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Token accounting reported by the upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The text produced by one completion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    /// Generated content
    pub content: String,
    /// Model that actually served the request, when reported
    pub model: Option<String>,
    /// Why generation stopped, when reported
    pub finish_reason: Option<String>,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// A completion carrying only text
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Chat-completion backend
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Issue exactly one completion request (no retries)
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}

/// Content moderation backend
#[async_trait]
pub trait ModerationService: Send + Sync {
    /// Returns true when the upstream flags the text
    async fn flagged(&self, text: &str) -> Result<bool>;
}
