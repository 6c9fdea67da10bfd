//! Roadmap generation entry point
//!
//! Tries each configured model in order, one at a time, and returns the first
//! roadmap that validates. Upstream failures of any quality class end in the
//! mock roadmap tagged as a fallback; only caller contract violations and
//! request-construction defects are returned as errors.

use std::sync::Arc;

use llm_sdk::CompletionService;
use log::{info, warn};
use tokio::time::Instant;

use crate::cancel::CancellationToken;
use crate::config::RoadmapConfig;
use crate::error::{AttemptError, AttemptErrorKind, Result, RoadmapError};
use crate::invocation::{ModelInvoker, ModelProfile};
use crate::mock;
use crate::model::{Provenance, Roadmap, RoadmapRequest};

/// Produces roadmaps from the configured models, falling back to the mock
#[derive(Debug, Clone)]
pub struct RoadmapGenerator {
    /// `None` when no credential is configured
    invoker: Option<ModelInvoker>,
    models: Vec<ModelProfile>,
    deadline: Option<std::time::Duration>,
}

impl RoadmapGenerator {
    /// Generator over `backend`; `None` means no credential and always mock
    pub fn new(backend: Option<Arc<dyn CompletionService>>, config: &RoadmapConfig) -> Self {
        Self {
            invoker: backend
                .map(|backend| ModelInvoker::new(backend, config.retry.clone(), config.temperature)),
            models: config.models.clone(),
            deadline: config.deadline,
        }
    }

    /// Generator that never calls out
    pub fn mock_only() -> Self {
        Self::new(None, &RoadmapConfig::default())
    }

    /// Build from the environment
    ///
    /// A missing credential selects the mock path. A credential with an
    /// unusable endpoint configuration is an error.
    pub fn from_env(config: &RoadmapConfig) -> Result<Self> {
        if config_rs::get_credential(llm_sdk::config::API_KEY_VARS).is_none() {
            info!("No LLM credential configured; roadmaps will use mock data");
            return Ok(Self::new(None, config));
        }

        let client = llm_sdk::openai_client().map_err(|e| RoadmapError::Configuration(e.to_string()))?;
        let backend: Arc<dyn CompletionService> = Arc::new(client);
        Ok(Self::new(Some(backend), config))
    }

    pub fn has_backend(&self) -> bool {
        self.invoker.is_some()
    }

    pub fn models(&self) -> &[ModelProfile] {
        &self.models
    }

    /// Generate a roadmap for `name` aiming at `target_career`
    pub async fn generate_roadmap(&self, name: &str, target_career: &str) -> Result<Roadmap> {
        self.generate_roadmap_with_cancel(name, target_career, &CancellationToken::new())
            .await
    }

    /// Generate a roadmap, stopping early when `cancel` fires or the deadline passes
    ///
    /// An early stop aborts the in-flight request or backoff sleep and returns
    /// the fallback roadmap.
    pub async fn generate_roadmap_with_cancel(
        &self,
        name: &str,
        target_career: &str,
        cancel: &CancellationToken,
    ) -> Result<Roadmap> {
        let request = RoadmapRequest::new(name, target_career)?;

        let invoker = match &self.invoker {
            Some(invoker) if !self.models.is_empty() => invoker,
            _ => {
                info!("Generating mock roadmap for '{}'", request.target_career);
                return Ok(mock::synthesize_for(&request));
            }
        };

        let deadline = self.deadline.map(|d| Instant::now() + d);
        let last = match self.try_models(invoker, &request, cancel, deadline).await? {
            Ok(roadmap) => return Ok(roadmap),
            Err(last) => last,
        };
        let quota_exceeded = last.is_rate_limited();
        warn!(
            "All roadmap attempts failed (last: {}); using mock data{}",
            last,
            if quota_exceeded { " after quota exhaustion" } else { "" }
        );

        let roadmap = mock::synthesize_for(&request);
        let (content, provenance) = roadmap.into_parts();
        Ok(Roadmap::new(
            content,
            provenance.with_failure(quota_exceeded, last.message),
        ))
    }

    /// Walk the model list
    ///
    /// The outer `Result` carries errors for the caller; the inner error is the
    /// failure that ended the loop.
    async fn try_models(
        &self,
        invoker: &ModelInvoker,
        request: &RoadmapRequest,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
    ) -> Result<std::result::Result<Roadmap, AttemptError>> {
        let mut last_error = None;

        for (position, profile) in self.models.iter().enumerate() {
            info!(
                "Roadmap attempt {}/{} with {}",
                position + 1,
                self.models.len(),
                profile.id
            );

            let outcome = tokio::select! {
                biased;
                reason = cancel.stopped(deadline) => Err(AttemptError::cancelled(&profile.id, reason.as_str())),
                result = invoker.attempt_generation(request, profile) => result,
            };

            let error = match outcome {
                Ok(content) => {
                    info!("Roadmap generated by {}", profile.id);
                    return Ok(Ok(Roadmap::new(
                        content,
                        Provenance::generated(request, profile.id.clone()),
                    )));
                }
                Err(error) => error,
            };

            warn!("Model {} failed ({}): {}", profile.id, error.kind, error.message);
            match error.kind {
                AttemptErrorKind::InvalidRequest => return Err(error.into()),
                AttemptErrorKind::Cancelled | AttemptErrorKind::Unauthorized => return Ok(Err(error)),
                AttemptErrorKind::RateLimited
                | AttemptErrorKind::MalformedResponse
                | AttemptErrorKind::Transport
                | AttemptErrorKind::ModelUnavailable => last_error = Some(error),
            }
        }

        Ok(Err(last_error.unwrap_or_else(|| {
            AttemptError::new(AttemptErrorKind::ModelUnavailable, "", "no models configured")
        })))
    }
}
