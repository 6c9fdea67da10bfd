//! Roadmap service configuration
//!
//! Environment variables:
//! - `LLM_MODELS`: ordered candidates, `model[:structured|:free_text]`, comma separated
//! - `LLM_MAX_RETRIES`, `LLM_INITIAL_RETRY_DELAY_MS`, `LLM_MAX_RETRY_DELAY_MS`, `LLM_RETRY_JITTER`
//! - `LLM_TEMPERATURE`
//! - `ROADMAP_DEADLINE_SECS`: optional overall deadline per roadmap
//!
//! The credential and endpoint are read by `llm-sdk` (`LLM_API_KEY`, `LLM_API_URL`).

use std::time::Duration;

use llm_sdk::RetryConfig;

use crate::error::{Result, RoadmapError};
use crate::invocation::ModelProfile;

pub const DEFAULT_MODELS: &[&str] = &[
    "gpt-3.5-turbo:free_text",
    "gpt-4o-mini:structured",
    "gpt-4o:structured",
];

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct RoadmapConfig {
    /// Candidate models, tried in order
    pub models: Vec<ModelProfile>,
    /// Retry policy applied per model
    pub retry: RetryConfig,
    /// Retry policy for advice and skill-gap requests
    pub advice_retry: RetryConfig,
    pub temperature: f32,
    /// Overall deadline for one roadmap, across all models
    pub deadline: Option<Duration>,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            models: ModelProfile::defaults(),
            retry: RetryConfig::default(),
            advice_retry: RetryConfig {
                initial_interval: Duration::from_millis(1000),
                ..RetryConfig::default()
            },
            temperature: DEFAULT_TEMPERATURE,
            deadline: None,
        }
    }
}

impl RoadmapConfig {
    pub fn from_env() -> Result<Self> {
        let entries = config_rs::get_env_list("LLM_MODELS", DEFAULT_MODELS);
        let models = parse_models(entries.as_slice())?;

        let retry = RetryConfig {
            max_retries: config_rs::get_env_var("LLM_MAX_RETRIES", 2u32),
            initial_interval: config_rs::get_duration_ms("LLM_INITIAL_RETRY_DELAY_MS", 2000),
            max_interval: config_rs::get_duration_ms("LLM_MAX_RETRY_DELAY_MS", 30_000),
            randomization_factor: config_rs::get_env_var("LLM_RETRY_JITTER", 0.0f64),
            ..RetryConfig::default()
        };

        let config = Self {
            models,
            advice_retry: RetryConfig {
                initial_interval: retry.initial_interval / 2,
                ..retry.clone()
            },
            retry,
            temperature: config_rs::get_env_var("LLM_TEMPERATURE", DEFAULT_TEMPERATURE),
            deadline: config_rs::get_optional_duration_secs("ROADMAP_DEADLINE_SECS"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(RoadmapError::Configuration(format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.retry.randomization_factor) {
            return Err(RoadmapError::Configuration(format!(
                "retry jitter {} outside 0.0..=1.0",
                self.retry.randomization_factor
            )));
        }
        if self.retry.initial_interval > self.retry.max_interval {
            return Err(RoadmapError::Configuration(
                "initial retry delay exceeds maximum retry delay".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse `model[:strategy]` entries, skipping blanks
pub fn parse_models<S: AsRef<str>>(entries: &[S]) -> Result<Vec<ModelProfile>> {
    let models = entries
        .iter()
        .map(|entry| entry.as_ref())
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| entry.parse::<ModelProfile>().map_err(RoadmapError::Configuration))
        .collect::<Result<Vec<_>>>()?;

    if models.is_empty() {
        return Err(RoadmapError::Configuration("LLM_MODELS lists no models".to_string()));
    }
    Ok(models)
}
