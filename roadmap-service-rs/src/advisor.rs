//! Career advice and skill-gap analysis
//!
//! Both operations use one free-text completion through the same retry
//! executor as roadmap generation. Without a credential they answer from
//! canned text; when rate limiting outlives the retries, advice degrades to a
//! canned "high demand" answer while skill-gap analysis reports the failure.

use std::fmt;
use std::sync::Arc;

use input_validation_rs::validators::{not_blank, user_text};
use input_validation_rs::{child_path, index_path, ValidationError, ValidationResult};
use llm_sdk::{
    extract_json_object, CompletionRequest, CompletionService, RetryExecutor,
    ServiceError,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::RoadmapConfig;
use crate::error::{Result, RoadmapError};
use crate::model::MOCK_SOURCE_MODEL;
use crate::prompt;

pub const ADVICE_MAX_TOKENS: u32 = 500;
pub const SKILL_GAP_MAX_TOKENS: u32 = 1500;

/// Answer to a career question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub text: String,
    pub source_model: String,
    pub is_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    Critical,
    Important,
    #[serde(rename = "Nice to have")]
    NiceToHave,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Importance::Critical => "Critical",
            Importance::Important => "Important",
            Importance::NiceToHave => "Nice to have",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub importance: Importance,
    pub time_to_learn: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub analysis: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<SkillGap>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// 0.0 ..= 1.0
    pub confidence: f64,
    #[serde(default)]
    pub is_fallback: bool,
}

impl SkillGapAnalysis {
    fn check(&self) -> ValidationResult<()> {
        not_blank("analysis", &self.analysis)?;
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::OutOfRange {
                field: "confidence".to_string(),
                message: format!("{} is not within 0.0..=1.0", self.confidence),
            });
        }
        for (i, gap) in self.gaps.iter().enumerate() {
            not_blank(&child_path(&index_path("gaps", i), "skill"), &gap.skill)?;
        }
        Ok(())
    }
}

/// Canned advice used when no credential is configured
pub fn unavailable_advice(question: &str) -> String {
    format!(
        "Thank you for your question about \"{}\". While our AI advisor is currently unavailable, \
         here's some general guidance: Focus on continuous learning, build a strong professional network, \
         and gain practical experience through projects or internships. For personalized career advice, \
         consider consulting with a career counselor or mentor in your target field.",
        question
    )
}

/// Canned advice used when the upstream is saturated
pub const HIGH_DEMAND_ADVICE: &str = "I apologize, but our AI advisor is currently experiencing high demand. \
Here's some general advice: Research your target industry thoroughly, develop relevant skills through \
online courses and practice projects, and connect with professionals in your field. Consider reaching out \
to career counselors or mentors for personalized guidance.";

const DEFAULT_STRENGTHS: [&str; 3] = ["Communication", "Problem Solving", "Adaptability"];

/// Deterministic skill-gap analysis used without a credential
pub fn mock_skill_gap(current_skills: &[String], target_career: &str) -> SkillGapAnalysis {
    let strengths = if current_skills.is_empty() {
        DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect()
    } else {
        current_skills.iter().take(3).cloned().collect()
    };

    let gap = |skill: &str, importance, time_to_learn: &str, resources: [&str; 2]| SkillGap {
        skill: skill.to_string(),
        importance,
        time_to_learn: time_to_learn.to_string(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
    };

    SkillGapAnalysis {
        analysis: format!(
            "Based on your interest in {} and current skills, there are several areas for development. \
             Focus on building both technical and soft skills relevant to your target role.",
            target_career
        ),
        strengths,
        gaps: vec![
            gap("Technical Skills", Importance::Critical, "3-6 months", ["Online Courses", "Practice Projects"]),
            gap("Industry Knowledge", Importance::Important, "2-4 months", ["Industry Publications", "Networking"]),
            gap("Certifications", Importance::NiceToHave, "1-3 months", ["Official Training", "Study Materials"]),
        ],
        recommendations: vec![
            "Start with foundational technical skills".to_string(),
            "Build a portfolio of relevant projects".to_string(),
            "Network with professionals in your target field".to_string(),
        ],
        confidence: 0.7,
        is_fallback: true,
    }
}

/// Career question answering and skill-gap analysis
#[derive(Clone)]
pub struct CareerAdvisor {
    backend: Option<Arc<dyn CompletionService>>,
    model: String,
    temperature: f32,
    retry: RetryExecutor,
}

impl fmt::Debug for CareerAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CareerAdvisor")
            .field("has_backend", &self.backend.is_some())
            .field("model", &self.model)
            .finish()
    }
}

impl CareerAdvisor {
    /// Advisor over `backend`, using the first configured model
    pub fn new(backend: Option<Arc<dyn CompletionService>>, config: &RoadmapConfig) -> Self {
        let model = config
            .models
            .first()
            .map(|profile| profile.id.clone())
            .unwrap_or_else(|| "gpt-3.5-turbo".to_string());

        Self {
            backend,
            model,
            temperature: config.temperature,
            retry: RetryExecutor::new(config.advice_retry.clone()),
        }
    }

    async fn complete(&self, backend: &Arc<dyn CompletionService>, request: CompletionRequest) -> llm_sdk::Result<String> {
        let completion = self.retry.execute(|| backend.complete(&request)).await?;
        if let Some(usage) = completion.usage {
            info!("Advisor request to {} completed. Used {} tokens", request.model, usage.total_tokens);
        }
        Ok(completion.content)
    }

    /// Answer a career question, optionally framed by an area of interest
    pub async fn get_career_advice(&self, question: &str, context: Option<&str>) -> Result<Advice> {
        user_text("question", question)?;

        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                return Ok(Advice {
                    text: unavailable_advice(question.trim()),
                    source_model: MOCK_SOURCE_MODEL.to_string(),
                    is_fallback: true,
                })
            }
        };

        let request = CompletionRequest::new(
            self.model.clone(),
            prompt::ADVICE_SYSTEM_INSTRUCTION,
            prompt::advice_user_message(question.trim(), context),
        )
        .max_output_tokens(ADVICE_MAX_TOKENS)
        .temperature(self.temperature);

        match self.complete(backend, request).await {
            Ok(text) => Ok(Advice {
                text: text.trim().to_string(),
                source_model: self.model.clone(),
                is_fallback: false,
            }),
            Err(e) if e.is_rate_limited() => {
                warn!("Career advice rate limited, using canned answer: {}", e);
                Ok(Advice {
                    text: HIGH_DEMAND_ADVICE.to_string(),
                    source_model: MOCK_SOURCE_MODEL.to_string(),
                    is_fallback: true,
                })
            }
            Err(e) => Err(RoadmapError::AdviceUnavailable(e)),
        }
    }

    /// Compare current skills with what `target_career` needs
    pub async fn analyze_skill_gap(
        &self,
        current_skills: &[String],
        target_career: &str,
    ) -> Result<SkillGapAnalysis> {
        user_text("targetCareer", target_career)?;
        let target_career = target_career.trim();
        let current_skills: Vec<String> = current_skills
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let backend = match &self.backend {
            Some(backend) => backend,
            None => return Ok(mock_skill_gap(&current_skills, target_career)),
        };

        let request = CompletionRequest::new(
            self.model.clone(),
            prompt::SKILL_GAP_SYSTEM_INSTRUCTION,
            prompt::skill_gap_user_message(&current_skills, target_career),
        )
        .max_output_tokens(SKILL_GAP_MAX_TOKENS)
        .temperature(self.temperature);

        let text = self
            .complete(backend, request)
            .await
            .map_err(RoadmapError::AdviceUnavailable)?;

        parse_skill_gap(&text).map_err(RoadmapError::AdviceUnavailable)
    }
}

/// Extract, parse and check a skill-gap analysis from free text
pub fn parse_skill_gap(text: &str) -> llm_sdk::Result<SkillGapAnalysis> {
    let json = extract_json_object(text)
        .ok_or_else(|| ServiceError::parsing("no JSON object found in skill-gap response"))?;
    let mut analysis: SkillGapAnalysis = serde_json::from_str(json)?;
    analysis
        .check()
        .map_err(|e| ServiceError::parsing(format!("invalid skill-gap analysis: {}", e)))?;
    analysis.is_fallback = false;
    Ok(analysis)
}
