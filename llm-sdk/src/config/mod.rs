//! Configuration management for service clients
//!
//! Loads and validates client settings from the environment through
//! `config-rs`, so `.env` files and plain variables behave the same way.

use std::time::Duration;

use crate::error::{Result, ServiceError};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default moderation model
pub const DEFAULT_MODERATION_MODEL: &str = "text-moderation-latest";

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: &[&str] = &["LLM_API_KEY", "OPENAI_API_KEY"];

/// Trait implemented by every validated client configuration
pub trait ServiceConfig {
    /// Validate the configuration
    fn validate(&self) -> Result<()>;

    /// Name of the service this configuration is for
    fn service_name(&self) -> &str;
}

/// Base configuration for an OpenAI-compatible API
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key
    pub api_key: String,

    /// Organization ID (optional)
    pub org_id: Option<String>,

    /// Base URL (can be changed for proxies)
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Model used by the moderation endpoint
    pub moderation_model: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            org_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            moderation_model: DEFAULT_MODERATION_MODEL.to_string(),
        }
    }
}

impl OpenAIConfig {
    /// Load configuration from the environment
    ///
    /// Fails with `Configuration` when no usable credential is present;
    /// placeholder keys count as absent.
    pub fn from_env() -> Result<Self> {
        let api_key = config_rs::get_credential(API_KEY_VARS).ok_or_else(|| {
            ServiceError::configuration("No API key configured (LLM_API_KEY / OPENAI_API_KEY)")
        })?;

        let config = Self {
            api_key,
            org_id: config_rs::get_env_string("OPENAI_ORG_ID"),
            base_url: config_rs::get_env_string_or("LLM_API_URL", DEFAULT_BASE_URL),
            timeout: config_rs::get_duration_secs("LLM_REQUEST_TIMEOUT_SECS", 60),
            moderation_model: config_rs::get_env_string_or(
                "MODERATION_MODEL",
                DEFAULT_MODERATION_MODEL,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl ServiceConfig for OpenAIConfig {
    fn validate(&self) -> Result<()> {
        if !config_rs::is_real_credential(&self.api_key) {
            return Err(ServiceError::configuration("OpenAI API key is required"));
        }

        if self.base_url.trim().is_empty() {
            return Err(ServiceError::configuration("OpenAI base URL is required"));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid base URL: {}", e)))?;

        if self.timeout.is_zero() {
            return Err(ServiceError::configuration("Request timeout must be positive"));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "openai"
    }
}
