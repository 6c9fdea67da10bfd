//! # Roadmap Service
//!
//! Turns a name and a desired career into a validated career roadmap: a
//! career summary, 12-16 skills, a six-month plan and 8-10 courses.
//!
//! - [`RoadmapGenerator`] tries each configured model in order and falls back
//!   to a deterministic mock roadmap when the upstream is unconfigured,
//!   saturated or returns unusable output
//! - [`schema`] checks every model response before it reaches the caller
//! - [`CareerAdvisor`] answers career questions and analyses skill gaps
//! - [`SessionContext`] carries the current user explicitly
//!
//! Screening user text is the caller's job; see `content-safety-rs`.

pub mod advisor;
pub mod cancel;
pub mod config;
pub mod error;
pub mod generator;
pub mod invocation;
pub mod mock;
pub mod model;
pub mod prompt;
pub mod schema;
pub mod session;

pub use advisor::{Advice, CareerAdvisor, Importance, SkillGap, SkillGapAnalysis};
pub use cancel::{CancelReason, CancellationToken};
pub use config::RoadmapConfig;
pub use error::{AttemptError, AttemptErrorKind, Result, RoadmapError};
pub use generator::RoadmapGenerator;
pub use invocation::{ModelInvoker, ModelProfile, RequestStrategy};
pub use model::{
    CareerSummary, CourseRecommendation, Priority, Provenance, Roadmap, RoadmapContent,
    RoadmapRequest, SkillCategory, SkillItem, SkillLevel, TimelineMonth, TimelineTask,
};
pub use session::{SessionContext, UserProfile};
