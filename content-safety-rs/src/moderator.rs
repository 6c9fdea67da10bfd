// content-safety-rs/src/moderator.rs
// Content moderation in front of prompt construction.
// Backend mode asks the moderation API; degraded mode uses the denylist.
// Backend failures never block the caller: they are logged and treated as safe.

use std::sync::Arc;

use llm_sdk::ModerationService;
use log::{debug, warn};

use crate::denylist::Denylist;

/// What decided a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// The moderation backend answered
    Backend,
    /// Degraded mode denylist check
    Denylist,
    /// The backend failed and the text was let through
    FailOpen,
}

impl VerdictSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictSource::Backend => "BACKEND",
            VerdictSource::Denylist => "DENYLIST",
            VerdictSource::FailOpen => "FAIL_OPEN",
        }
    }
}

/// Moderation result with details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationVerdict {
    pub safe: bool,
    pub matched_term: Option<String>,
    pub source: VerdictSource,
}

impl ModerationVerdict {
    fn backend(flagged: bool) -> Self {
        Self {
            safe: !flagged,
            matched_term: None,
            source: VerdictSource::Backend,
        }
    }

    fn fail_open() -> Self {
        Self {
            safe: true,
            matched_term: None,
            source: VerdictSource::FailOpen,
        }
    }

    fn denylist(matched_term: Option<String>) -> Self {
        Self {
            safe: matched_term.is_none(),
            matched_term,
            source: VerdictSource::Denylist,
        }
    }
}

/// Classifies free text as safe or unsafe before it reaches a prompt
#[derive(Clone)]
pub struct ContentModerator {
    backend: Option<Arc<dyn ModerationService>>,
    denylist: Denylist,
}

impl std::fmt::Debug for ContentModerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentModerator")
            .field("backend", &self.backend.is_some())
            .field("denylist", &self.denylist.terms())
            .finish()
    }
}

impl ContentModerator {
    /// Moderator backed by a moderation service
    pub fn with_backend(backend: Arc<dyn ModerationService>) -> Self {
        Self {
            backend: Some(backend),
            denylist: Denylist::default(),
        }
    }

    /// Degraded-mode moderator using only the denylist
    pub fn degraded(denylist: Denylist) -> Self {
        Self {
            backend: None,
            denylist,
        }
    }

    /// True when a backend is configured
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Full verdict for `text`
    pub async fn screen(&self, text: &str) -> ModerationVerdict {
        match &self.backend {
            Some(backend) => match backend.flagged(text).await {
                Ok(flagged) => {
                    debug!("Moderation backend verdict: flagged={}", flagged);
                    ModerationVerdict::backend(flagged)
                }
                Err(e) => {
                    warn!("Moderation backend failed, allowing content: {}", e);
                    ModerationVerdict::fail_open()
                }
            },
            None => {
                let verdict = ModerationVerdict::denylist(self.denylist.find(text));
                if let Some(term) = &verdict.matched_term {
                    debug!("Denylist matched term '{}'", term);
                }
                verdict
            }
        }
    }

    /// Returns false only when the text is judged unsafe
    pub async fn is_safe(&self, text: &str) -> bool {
        self.screen(text).await.safe
    }

    /// True when every text is safe; stops at the first unsafe one
    pub async fn all_safe(&self, texts: &[&str]) -> bool {
        for text in texts {
            if !self.is_safe(text).await {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_sdk::ServiceError;
    use mockall::mock;

    mock! {
        pub Moderation {}

        #[async_trait]
        impl ModerationService for Moderation {
            async fn flagged(&self, text: &str) -> llm_sdk::Result<bool>;
        }
    }

    #[tokio::test]
    async fn test_backend_flagged_is_unsafe() {
        let mut backend = MockModeration::new();
        backend.expect_flagged().times(1).returning(|_| Ok(true));

        let moderator = ContentModerator::with_backend(Arc::new(backend));
        let verdict = moderator.screen("anything").await;
        assert!(!verdict.safe);
        assert_eq!(verdict.source, VerdictSource::Backend);
    }

    #[tokio::test]
    async fn test_backend_clean_is_safe() {
        let mut backend = MockModeration::new();
        backend.expect_flagged().times(1).returning(|_| Ok(false));

        let moderator = ContentModerator::with_backend(Arc::new(backend));
        // Backend mode ignores the denylist
        assert!(moderator.is_safe("this is spam").await);
    }

    #[tokio::test]
    async fn test_backend_failure_fails_open() {
        let mut backend = MockModeration::new();
        backend
            .expect_flagged()
            .times(1)
            .returning(|_| Err(ServiceError::network("connection refused")));

        let moderator = ContentModerator::with_backend(Arc::new(backend));
        let verdict = moderator.screen("hello").await;
        assert!(verdict.safe);
        assert_eq!(verdict.source, VerdictSource::FailOpen);
    }

    #[tokio::test]
    async fn test_degraded_mode_denylist() {
        let moderator = ContentModerator::degraded(Denylist::default());
        assert!(!moderator.has_backend());

        let verdict = moderator.screen("this is spam").await;
        assert!(!verdict.safe);
        assert_eq!(verdict.matched_term.as_deref(), Some("spam"));
        assert_eq!(verdict.source, VerdictSource::Denylist);

        assert!(moderator.is_safe("software engineer").await);
    }

    #[tokio::test]
    async fn test_all_safe_stops_at_first_unsafe() {
        let mut backend = MockModeration::new();
        backend
            .expect_flagged()
            .times(1)
            .returning(|_| Ok(true));

        let moderator = ContentModerator::with_backend(Arc::new(backend));
        assert!(!moderator.all_safe(&["first", "second"]).await);
    }
}
