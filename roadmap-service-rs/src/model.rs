//! Roadmap data model
//!
//! Wire form is camelCase JSON. A `Roadmap` is only produced by the schema
//! validator or the mock synthesizer, so every instance satisfies the
//! structural invariants in [`crate::schema`]. Deserializing one runs the
//! same validator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use input_validation_rs::{validate, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// `sourceModel` value stamped on synthesized roadmaps
pub const MOCK_SOURCE_MODEL: &str = "mock-data";

/// A single roadmap submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub requester_name: String,
    pub target_career: String,
}

impl RoadmapRequest {
    /// Build a request, trimming both fields and rejecting blank input
    ///
    /// Length is not limited here; prompts bound what they send upstream.
    pub fn new(requester_name: &str, target_career: &str) -> ValidationResult<Self> {
        let requester_name = validate("requesterName", requester_name.trim())
            .not_blank()
            .finish()?
            .to_string();
        let target_career = validate("targetCareer", target_career.trim())
            .not_blank()
            .finish()?
            .to_string();

        Ok(Self {
            requester_name,
            target_career,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub title: String,
    pub description: String,
    pub growth_outlook: String,
    pub salary_range: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire names of every variant
            pub const WIRE_NAMES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(other.to_string()),
                }
            }
        }
    };
}

wire_enum!(
    /// Skill grouping shown to the user
    SkillCategory {
        Technical => "Technical",
        SoftSkills => "Soft Skills",
        Tools => "Tools",
        Certifications => "Certifications",
        Languages => "Languages",
    }
);

wire_enum!(
    SkillLevel {
        Beginner => "Beginner",
        Intermediate => "Intermediate",
        Advanced => "Advanced",
    }
);

wire_enum!(
    Priority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillItem {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMonth {
    /// 1-based month number
    pub month_index: u8,
    pub title: String,
    pub description: String,
    pub tasks: Vec<TimelineTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    pub title: String,
    pub provider: String,
    pub description: String,
    pub duration: String,
    pub rating: String,
    pub url: String,
}

/// Everything a model produces; the roadmap minus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapContent {
    pub career: CareerSummary,
    pub skills: Vec<SkillItem>,
    pub timeline: Vec<TimelineMonth>,
    pub courses: Vec<CourseRecommendation>,
}

/// How and for whom a roadmap was generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub generated_for: String,
    pub target_career: String,
    pub generated_at_utc: DateTime<Utc>,
    pub source_model: String,
    pub is_fallback: bool,
    pub quota_exceeded: bool,
    /// Terminal upstream error when a fallback followed at least one attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Provenance {
    /// Provenance for content produced by `model`
    pub fn generated(request: &RoadmapRequest, model: impl Into<String>) -> Self {
        Self {
            generated_for: request.requester_name.clone(),
            target_career: request.target_career.clone(),
            generated_at_utc: Utc::now(),
            source_model: model.into(),
            is_fallback: false,
            quota_exceeded: false,
            failure_reason: None,
        }
    }

    /// Provenance for synthesized fallback content
    pub fn fallback(request: &RoadmapRequest) -> Self {
        Self {
            is_fallback: true,
            ..Self::generated(request, MOCK_SOURCE_MODEL)
        }
    }

    pub fn with_failure(mut self, quota_exceeded: bool, reason: impl Into<String>) -> Self {
        self.quota_exceeded = quota_exceeded;
        self.failure_reason = Some(reason.into());
        self
    }
}

/// Validated roadmap handed to the caller
///
/// Fields are read-only; the roadmap is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct Roadmap {
    #[serde(flatten)]
    content: RoadmapContent,
    provenance: Provenance,
}

impl Roadmap {
    pub(crate) fn new(content: RoadmapContent, provenance: Provenance) -> Self {
        Self {
            content,
            provenance,
        }
    }

    pub fn content(&self) -> &RoadmapContent {
        &self.content
    }

    pub fn career(&self) -> &CareerSummary {
        &self.content.career
    }

    pub fn skills(&self) -> &[SkillItem] {
        &self.content.skills
    }

    pub fn timeline(&self) -> &[TimelineMonth] {
        &self.content.timeline
    }

    pub fn courses(&self) -> &[CourseRecommendation] {
        &self.content.courses
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance.is_fallback
    }

    pub fn into_parts(self) -> (RoadmapContent, Provenance) {
        (self.content, self.provenance)
    }
}

impl TryFrom<serde_json::Value> for Roadmap {
    type Error = ValidationError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        crate::schema::validate(&value)
    }
}
