//! Explicit session state for the host application
//!
//! A `SessionContext` is created at login, read by views that need identity
//! and cleared at logout. It is passed by value or reference, never stored
//! globally. Identity is not verified; this is a convenience for the host.

use input_validation_rs::{validate, ValidationError};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadmapError};
use crate::model::Roadmap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    user: Option<UserProfile>,
    last_roadmap: Option<Roadmap>,
}

impl SessionContext {
    /// A session with nobody logged in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Start a session for `name`
    pub fn login(name: &str, email: Option<&str>) -> Result<Self> {
        let name = validate("name", name.trim())
            .not_blank()
            .finish()?
            .to_string();

        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) if !email.contains('@') => {
                return Err(RoadmapError::InvalidRequest(ValidationError::new(format!(
                    "email '{}' is not an address",
                    email
                ))))
            }
            other => other.map(str::to_string),
        };

        Ok(Self {
            user: Some(UserProfile { name, email }),
            last_roadmap: None,
        })
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The logged-in user, or `InvalidRequest` for an anonymous session
    pub fn require_user(&self) -> Result<&UserProfile> {
        self.user
            .as_ref()
            .ok_or_else(|| RoadmapError::InvalidRequest(ValidationError::MissingField("user".to_string())))
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// End the session, dropping the cached roadmap with it
    pub fn logout(&mut self) {
        self.user = None;
        self.last_roadmap = None;
    }

    pub fn remember_roadmap(&mut self, roadmap: Roadmap) {
        self.last_roadmap = Some(roadmap);
    }

    pub fn last_roadmap(&self) -> Option<&Roadmap> {
        self.last_roadmap.as_ref()
    }
}
