//! OpenAI API data models
//!
//! This module contains type definitions for OpenAI API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// A chat message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message author
    pub role: Role,

    /// The content of the message
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Named JSON schema inside a `response_format`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSchemaFormat {
    /// Schema name
    pub name: String,

    /// The schema itself
    pub schema: Value,
}

/// Requested output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Plain text
    Text,
    /// Any JSON object
    JsonObject,
    /// JSON conforming to a schema
    JsonSchema { json_schema: JsonSchemaFormat },
}

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChatCompletionRequest {
    /// ID of the model to use
    pub model: String,

    /// The messages to generate chat completions for
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature (0.0-2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Output format constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// A chat completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// Index of the choice
    #[serde(default)]
    pub index: u32,

    /// The generated message
    pub message: ChatCompletionMessage,

    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A message in a chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    /// Role of the message
    pub role: String,

    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,

    /// Refusal text, when the model declined to answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,

    /// Number of completion tokens
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    #[serde(default)]
    pub id: String,

    /// Model used
    #[serde(default)]
    pub model: String,

    /// Choices generated
    pub choices: Vec<ChatCompletionChoice>,

    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Moderation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModerationRequest {
    /// Moderation model
    pub model: String,

    /// Text to classify
    pub input: String,
}

/// A single moderation verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    /// Whether any category was triggered
    pub flagged: bool,
}

/// Moderation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResponse {
    /// Response ID
    #[serde(default)]
    pub id: String,

    /// One result per input
    pub results: Vec<ModerationResult>,
}
