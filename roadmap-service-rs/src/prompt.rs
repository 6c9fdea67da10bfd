//! Prompt text for roadmap generation, career advice and skill-gap analysis

use llm_sdk::truncate_string;

use crate::invocation::RequestStrategy;
use crate::model::RoadmapRequest;
use crate::schema::{
    MAX_COURSES, MAX_SKILLS, MAX_TASKS_PER_MONTH, MIN_COURSES, MIN_SKILLS, MIN_TASKS_PER_MONTH,
    TIMELINE_MONTHS,
};

pub const ROADMAP_SYSTEM_INSTRUCTION: &str = "You are an expert career counselor and professional development advisor. \
Create detailed, actionable career roadmaps based on current industry standards and market demands. \
Always provide realistic timelines, genuine learning resources, and practical advice.";

pub const ADVICE_SYSTEM_INSTRUCTION: &str = "You are a professional career advisor with expertise across multiple industries. \
Provide practical, actionable career advice based on current market trends and professional best practices. \
Keep responses concise but comprehensive.";

pub const SKILL_GAP_SYSTEM_INSTRUCTION: &str = "You are a skills assessment expert who analyzes skill gaps \
and provides actionable learning recommendations for career transitions.";

/// Shape description appended for models that cannot be given a schema
const FREE_TEXT_SHAPE: &str = r#"Respond with a single JSON object and nothing else, using exactly these keys:
{
  "career": {"title": "", "description": "", "growthOutlook": "", "salaryRange": ""},
  "skills": [{"name": "", "category": "Technical|Soft Skills|Tools|Certifications|Languages", "level": "Beginner|Intermediate|Advanced"}],
  "timeline": [{"monthIndex": 1, "title": "", "description": "", "tasks": [{"title": "", "description": "", "priority": "high|medium|low", "timeframe": ""}]}],
  "courses": [{"title": "", "provider": "", "description": "", "duration": "", "rating": "", "url": "https://..."}]
}"#;

/// Longest name or career text sent upstream, in characters
pub const MAX_PROMPT_FIELD_CHARS: usize = 200;

const SKILL_GAP_SHAPE: &str = r#"Respond with a single JSON object and nothing else:
{"analysis": "", "strengths": [""], "gaps": [{"skill": "", "importance": "Critical|Important|Nice to have", "timeToLearn": "", "resources": [""]}], "recommendations": [""], "confidence": 0.0}"#;

/// User message for a roadmap request
pub fn roadmap_user_message(request: &RoadmapRequest, strategy: RequestStrategy) -> String {
    let name = truncate_string(&request.requester_name, MAX_PROMPT_FIELD_CHARS);
    let career = truncate_string(&request.target_career, MAX_PROMPT_FIELD_CHARS);
    let mut message = format!(
        "Create a comprehensive career roadmap for {name} who wants to become a {career}.\n\n\
         IMPORTANT REQUIREMENTS:\n\
         1. Provide between {min_skills} and {max_skills} relevant skills across Technical, Soft Skills, Tools, Certifications and Languages categories\n\
         2. Create a detailed month-by-month plan for exactly {months} months, numbered 1 to {months}\n\
         3. Each month must have between {min_tasks} and {max_tasks} specific, actionable tasks with a priority of high, medium or low\n\
         4. Recommend between {min_courses} and {max_courses} real courses from reputable providers\n\
         5. Every course must include a real, working https URL\n\
         6. Include accurate industry growth outlook and a realistic salary range\n\
         7. Tailor every recommendation to current {career} industry standards\n\
         8. Keep timeframes realistic for someone learning part-time",
        name = name,
        career = career,
        min_skills = MIN_SKILLS,
        max_skills = MAX_SKILLS,
        months = TIMELINE_MONTHS,
        min_tasks = MIN_TASKS_PER_MONTH,
        max_tasks = MAX_TASKS_PER_MONTH,
        min_courses = MIN_COURSES,
        max_courses = MAX_COURSES,
    );

    if strategy == RequestStrategy::FreeTextRequest {
        message.push_str("\n\n");
        message.push_str(FREE_TEXT_SHAPE);
    }

    message
}

/// User message for a career question, with optional interest context
pub fn advice_user_message(question: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("Context: The user is interested in {}. {}", context, question),
        None => question.to_string(),
    }
}

/// User message for a skill-gap analysis
pub fn skill_gap_user_message(current_skills: &[String], target_career: &str) -> String {
    let skills = if current_skills.is_empty() {
        "None specified".to_string()
    } else {
        current_skills.join(", ")
    };

    format!(
        "Analyze the skills gap for someone wanting to become a {}.\n\n\
         Current skills: {}\n\n\
         Provide a detailed analysis of their strengths, identify critical skill gaps, \
         and suggest specific learning resources and timelines.\n\n{}",
        target_career, skills, SKILL_GAP_SHAPE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RoadmapRequest {
        RoadmapRequest::new("Alex", "software engineer").unwrap()
    }

    #[test]
    fn test_roadmap_message_embeds_input_and_bounds() {
        let message = roadmap_user_message(&request(), RequestStrategy::StructuredRequest);
        assert!(message.contains("Alex who wants to become a software engineer"));
        assert!(message.contains("between 12 and 16 relevant skills"));
        assert!(message.contains("exactly 6 months"));
        assert!(message.contains("between 2 and 4"));
        assert!(message.contains("between 8 and 10 real courses"));
        assert!(!message.contains("\"monthIndex\""));
    }

    #[test]
    fn test_long_career_truncated_in_message() {
        let career = format!("software {}", "engineering ".repeat(50));
        let request = RoadmapRequest::new("Alex", &career).unwrap();
        let message = roadmap_user_message(&request, RequestStrategy::StructuredRequest);
        let expected = truncate_string(career.trim(), MAX_PROMPT_FIELD_CHARS);
        assert!(message.contains(&format!("wants to become a {}.", expected)));
        assert!(!message.contains(career.trim()));
    }

    #[test]
    fn test_free_text_message_describes_shape() {
        let message = roadmap_user_message(&request(), RequestStrategy::FreeTextRequest);
        assert!(message.contains("\"monthIndex\""));
        assert!(message.contains("Soft Skills"));
    }

    #[test]
    fn test_advice_context_prefix() {
        assert_eq!(
            advice_user_message("How do I start?", Some("nursing")),
            "Context: The user is interested in nursing. How do I start?"
        );
        assert_eq!(advice_user_message("How do I start?", Some("  ")), "How do I start?");
    }

    #[test]
    fn test_skill_gap_without_skills() {
        let message = skill_gap_user_message(&[], "Data Scientist");
        assert!(message.contains("Current skills: None specified"));
    }
}
