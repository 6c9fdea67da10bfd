//! # LLM SDK
//!
//! Client-side plumbing for OpenAI-compatible language-model APIs.
//!
//! This crate provides:
//!
//! - `CompletionService` / `ModerationService` traits that callers depend on
//! - A typed OpenAI client implementing both
//! - An error taxonomy that separates rate limiting from other failures
//! - Retry with exponential backoff
//! - Extraction of JSON objects from free-text model output

pub mod core;
pub use core::{
    Completion, CompletionRequest, CompletionService, ModerationService, ResponseSchema,
    ServiceClient, TokenUsage,
};

pub mod services;
pub use services::openai;

pub mod error;
pub use error::{ErrorContext, Result, ServiceError};

pub mod resilience;
pub use resilience::{RetryConfig, RetryExecutor};

pub mod config;
pub use config::{OpenAIConfig, ServiceConfig};

pub mod util;
pub use util::{extract_json_object, truncate_string};

/// Create an OpenAI client configured from the environment
pub fn openai_client() -> Result<services::openai::OpenAIClient> {
    services::openai::OpenAIClient::from_env()
}

#[cfg(test)]
mod tests;
