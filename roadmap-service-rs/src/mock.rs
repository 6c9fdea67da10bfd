//! Deterministic fallback roadmap
//!
//! Used when no credential is configured and when every model fails. The
//! content depends only on the target career, so two calls with the same
//! input differ only in their provenance timestamp.

use input_validation_rs::ValidationResult;

use crate::model::{
    CareerSummary, CourseRecommendation, Priority, Provenance, Roadmap, RoadmapContent,
    RoadmapRequest, SkillCategory, SkillItem, SkillLevel, TimelineMonth, TimelineTask,
};

/// Keyword (matched case-insensitively as a substring) to canonical title
const TITLE_KEYWORDS: &[(&str, &str)] = &[
    ("software", "Software Engineer"),
    ("data", "Data Scientist"),
    ("product", "Product Manager"),
];

const GROWTH_OUTLOOK: &str = "+22% growth expected over next 10 years";
const SALARY_RANGE: &str = "$75,000 - $160,000 annually";

const SKILLS: &[(&str, SkillCategory, SkillLevel)] = &[
    ("Programming Languages", SkillCategory::Technical, SkillLevel::Advanced),
    ("Problem Solving", SkillCategory::SoftSkills, SkillLevel::Advanced),
    ("Version Control (Git)", SkillCategory::Tools, SkillLevel::Intermediate),
    ("Agile Methodology", SkillCategory::Technical, SkillLevel::Intermediate),
    ("Communication", SkillCategory::SoftSkills, SkillLevel::Advanced),
    ("Database Management", SkillCategory::Technical, SkillLevel::Intermediate),
    ("Cloud Platforms", SkillCategory::Tools, SkillLevel::Intermediate),
    ("API Development", SkillCategory::Technical, SkillLevel::Advanced),
    ("Testing & QA", SkillCategory::Technical, SkillLevel::Intermediate),
    ("Team Collaboration", SkillCategory::SoftSkills, SkillLevel::Advanced),
    ("CI/CD Pipelines", SkillCategory::Tools, SkillLevel::Intermediate),
    ("Industry Certifications", SkillCategory::Certifications, SkillLevel::Beginner),
];

type TaskRow = (&'static str, &'static str, Priority, &'static str);

const TIMELINE: &[(&str, &str, [TaskRow; 2])] = &[
    (
        "Foundation Building",
        "Establish core fundamentals and learning routine",
        [
            ("Set up development environment", "Install necessary tools and configure workspace", Priority::High, "1 week"),
            ("Complete basic programming course", "Learn fundamental programming concepts", Priority::High, "3 weeks"),
        ],
    ),
    (
        "Skill Development",
        "Build intermediate technical skills",
        [
            ("Build first project", "Create a portfolio-worthy project", Priority::High, "2 weeks"),
            ("Learn version control", "Master Git and GitHub workflows", Priority::Medium, "1 week"),
        ],
    ),
    (
        "Advanced Learning",
        "Dive deeper into specialized areas",
        [
            ("Advanced framework study", "Learn industry-standard frameworks", Priority::High, "3 weeks"),
            ("Database fundamentals", "Understanding database design and querying", Priority::Medium, "1 week"),
        ],
    ),
    (
        "Project Portfolio",
        "Build comprehensive project portfolio",
        [
            ("Complete major project", "Build a full-stack application", Priority::High, "3 weeks"),
            ("Code review and optimization", "Refine and optimize existing projects", Priority::Medium, "1 week"),
        ],
    ),
    (
        "Professional Development",
        "Focus on career preparation and networking",
        [
            ("Resume and portfolio polish", "Perfect professional presentation materials", Priority::High, "1 week"),
            ("Practice interviews", "Technical and behavioral interview preparation", Priority::High, "2 weeks"),
        ],
    ),
    (
        "Job Search & Specialization",
        "Apply for positions and continue learning",
        [
            ("Job applications", "Apply to targeted positions", Priority::High, "2 weeks"),
            ("Skill specialization", "Deepen expertise in chosen area", Priority::Medium, "2 weeks"),
        ],
    ),
];

const COURSES: &[[&str; 6]] = &[
    ["Complete Web Development Bootcamp", "Udemy", "Comprehensive course covering full-stack web development", "65 hours", "4.7/5", "https://www.udemy.com"],
    ["CS50 Introduction to Computer Science", "Harvard (edX)", "Harvard's introduction to computer science fundamentals", "12 weeks", "4.9/5", "https://www.edx.org"],
    ["JavaScript Algorithms and Data Structures", "freeCodeCamp", "Free comprehensive JavaScript programming course", "300 hours", "4.8/5", "https://www.freecodecamp.org"],
    ["React - The Complete Guide", "Udemy", "Master React.js with hooks, context, and advanced patterns", "48 hours", "4.6/5", "https://www.udemy.com"],
    ["Python for Data Science", "Coursera", "Learn Python programming for data analysis", "6 weeks", "4.5/5", "https://www.coursera.org"],
    ["Git and GitHub Crash Course", "YouTube", "Master version control with practical examples", "2 hours", "4.7/5", "https://www.youtube.com"],
    ["Database Design and Management", "LinkedIn Learning", "Comprehensive database design principles", "4 hours", "4.4/5", "https://www.linkedin.com/learning"],
    ["Cloud Computing Fundamentals", "AWS Training", "Introduction to cloud computing concepts", "8 hours", "4.6/5", "https://aws.amazon.com/training"],
];

/// Canonical career title for free-text input
///
/// Keyword matches win; otherwise each word is capitalised.
pub fn career_title(target_career: &str) -> String {
    let lowered = target_career.to_lowercase();
    if let Some((_, title)) = TITLE_KEYWORDS.iter().find(|(kw, _)| lowered.contains(kw)) {
        return title.to_string();
    }

    let titled = target_career
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");

    if titled.is_empty() {
        "Professional".to_string()
    } else {
        titled
    }
}

fn career_description(title: &str) -> String {
    format!(
        "{} is an exciting and rapidly growing field with excellent opportunities for career advancement. \
         This role involves working with cutting-edge technologies and solving complex problems that impact \
         millions of users worldwide.\n\nWith the increasing digital transformation across industries, \
         professionals in this field are in high demand and can expect strong job security and competitive \
         compensation packages.",
        title
    )
}

/// Template content for a target career
pub fn mock_content(target_career: &str) -> RoadmapContent {
    let title = career_title(target_career);

    RoadmapContent {
        career: CareerSummary {
            description: career_description(&title),
            title,
            growth_outlook: GROWTH_OUTLOOK.to_string(),
            salary_range: SALARY_RANGE.to_string(),
        },
        skills: SKILLS
            .iter()
            .map(|(name, category, level)| SkillItem {
                name: name.to_string(),
                category: *category,
                level: *level,
            })
            .collect(),
        timeline: TIMELINE
            .iter()
            .zip(1u8..)
            .map(|((title, description, tasks), month_index)| TimelineMonth {
                month_index,
                title: title.to_string(),
                description: description.to_string(),
                tasks: tasks
                    .iter()
                    .map(|(title, description, priority, timeframe)| TimelineTask {
                        title: title.to_string(),
                        description: description.to_string(),
                        priority: *priority,
                        timeframe: timeframe.to_string(),
                    })
                    .collect(),
            })
            .collect(),
        courses: COURSES
            .iter()
            .map(|[title, provider, description, duration, rating, url]| CourseRecommendation {
                title: title.to_string(),
                provider: provider.to_string(),
                description: description.to_string(),
                duration: duration.to_string(),
                rating: rating.to_string(),
                url: url.to_string(),
            })
            .collect(),
    }
}

/// Fallback roadmap for an already validated request
pub fn synthesize_for(request: &RoadmapRequest) -> Roadmap {
    Roadmap::new(mock_content(&request.target_career), Provenance::fallback(request))
}

/// Fallback roadmap for raw input; fails only on blank input
pub fn synthesize(name: &str, target_career: &str) -> ValidationResult<Roadmap> {
    let request = RoadmapRequest::new(name, target_career)?;
    Ok(synthesize_for(&request))
}
