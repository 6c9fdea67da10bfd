//! Roadmap schema: the JSON schema declared to structured models and the
//! validator applied to every model response.
//!
//! Validation runs in two passes. The first walks the untyped JSON and checks
//! presence, JSON types and enum membership while building typed values. The
//! second checks the structural invariants on the typed content: non-blank
//! text, element counts, the exact month set and URL syntax. The first
//! violation is returned with its field path; nothing is repaired.

use chrono::{DateTime, Utc};
use input_validation_rs::validators::{
    exact_set, is_web_url, length_between, not_blank, strictly_ascending,
};
use input_validation_rs::{child_path, index_path, ValidationError, ValidationResult};
use serde_json::{json, Map, Value};

use crate::model::{
    CareerSummary, CourseRecommendation, Priority, Provenance, Roadmap, RoadmapContent,
    SkillCategory, SkillItem, SkillLevel, TimelineMonth, TimelineTask,
};

pub const MIN_SKILLS: usize = 12;
pub const MAX_SKILLS: usize = 16;
pub const TIMELINE_MONTHS: usize = 6;
pub const MIN_TASKS_PER_MONTH: usize = 2;
pub const MAX_TASKS_PER_MONTH: usize = 4;
pub const MIN_COURSES: usize = 8;
pub const MAX_COURSES: usize = 10;

/// Name under which the schema is declared to the upstream
pub const SCHEMA_NAME: &str = "career_roadmap_response";

/// Month indices every timeline must contain, in order
pub const MONTH_INDICES: [u8; TIMELINE_MONTHS] = [1, 2, 3, 4, 5, 6];

/// Read access to one JSON object, remembering where it sits in the document
struct Fields<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, path: impl Into<String>) -> ValidationResult<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            Value::Null => Err(ValidationError::MissingField(path)),
            _ => Err(ValidationError::invalid_type(path, "object")),
        }
    }

    fn get(&self, key: &str) -> ValidationResult<(String, &'a Value)> {
        let path = child_path(&self.path, key);
        match self.map.get(key) {
            None | Some(Value::Null) => Err(ValidationError::MissingField(path)),
            Some(value) => Ok((path, value)),
        }
    }

    fn object(&self, key: &str) -> ValidationResult<Fields<'a>> {
        let (path, value) = self.get(key)?;
        Fields::of(value, path)
    }

    fn text(&self, key: &str) -> ValidationResult<String> {
        let (path, value) = self.get(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ValidationError::invalid_type(path, "string"))
    }

    fn optional_text(&self, key: &str) -> ValidationResult<Option<String>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.text(key).map(Some),
        }
    }

    fn boolean(&self, key: &str) -> ValidationResult<bool> {
        let (path, value) = self.get(key)?;
        value
            .as_bool()
            .ok_or_else(|| ValidationError::invalid_type(path, "boolean"))
    }

    fn array(&self, key: &str) -> ValidationResult<(String, &'a [Value])> {
        let (path, value) = self.get(key)?;
        match value {
            Value::Array(items) => Ok((path, items.as_slice())),
            _ => Err(ValidationError::invalid_type(path, "array")),
        }
    }

    fn member<T>(&self, key: &str, allowed: &[&str]) -> ValidationResult<T>
    where
        T: std::str::FromStr,
    {
        let raw = self.text(key)?;
        raw.parse::<T>().map_err(|_| ValidationError::InvalidEnumValue {
            field: child_path(&self.path, key),
            value: raw.clone(),
            allowed: allowed.join(", "),
        })
    }

    fn month_index(&self, key: &str) -> ValidationResult<u8> {
        let (path, value) = self.get(key)?;
        value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| ValidationError::invalid_type(path, "integer"))
    }
}

fn parse_items<'a, T>(
    path: &str,
    items: &'a [Value],
    parse: impl Fn(Fields<'a>) -> ValidationResult<T>,
) -> ValidationResult<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Fields::of(item, index_path(path, i)).and_then(&parse))
        .collect()
}

fn parse_career(fields: Fields<'_>) -> ValidationResult<CareerSummary> {
    Ok(CareerSummary {
        title: fields.text("title")?,
        description: fields.text("description")?,
        growth_outlook: fields.text("growthOutlook")?,
        salary_range: fields.text("salaryRange")?,
    })
}

fn parse_skill(fields: Fields<'_>) -> ValidationResult<SkillItem> {
    Ok(SkillItem {
        name: fields.text("name")?,
        category: fields.member("category", SkillCategory::WIRE_NAMES)?,
        level: fields.member("level", SkillLevel::WIRE_NAMES)?,
    })
}

fn parse_task(fields: Fields<'_>) -> ValidationResult<TimelineTask> {
    Ok(TimelineTask {
        title: fields.text("title")?,
        description: fields.text("description")?,
        priority: fields.member("priority", Priority::WIRE_NAMES)?,
        timeframe: fields.text("timeframe")?,
    })
}

fn parse_month(fields: Fields<'_>) -> ValidationResult<TimelineMonth> {
    let month_index = fields.month_index("monthIndex")?;
    let title = fields.text("title")?;
    let description = fields.text("description")?;
    let (tasks_path, tasks) = fields.array("tasks")?;

    Ok(TimelineMonth {
        month_index,
        title,
        description,
        tasks: parse_items(&tasks_path, tasks, parse_task)?,
    })
}

fn parse_course(fields: Fields<'_>) -> ValidationResult<CourseRecommendation> {
    Ok(CourseRecommendation {
        title: fields.text("title")?,
        provider: fields.text("provider")?,
        description: fields.text("description")?,
        duration: fields.text("duration")?,
        rating: fields.text("rating")?,
        url: fields.text("url")?,
    })
}

fn parse_content(root: &Fields<'_>) -> ValidationResult<RoadmapContent> {
    let career = parse_career(root.object("career")?)?;
    let (skills_path, skills) = root.array("skills")?;
    let skills = parse_items(&skills_path, skills, parse_skill)?;
    let (timeline_path, timeline) = root.array("timeline")?;
    let timeline = parse_items(&timeline_path, timeline, parse_month)?;
    let (courses_path, courses) = root.array("courses")?;
    let courses = parse_items(&courses_path, courses, parse_course)?;

    Ok(RoadmapContent {
        career,
        skills,
        timeline,
        courses,
    })
}

fn parse_provenance(fields: Fields<'_>) -> ValidationResult<Provenance> {
    let timestamp_path = child_path(&fields.path, "generatedAtUtc");
    let generated_at_utc = fields
        .text("generatedAtUtc")?
        .parse::<DateTime<Utc>>()
        .map_err(|e| ValidationError::invalid_type(timestamp_path, format!("RFC 3339 timestamp ({})", e)))?;

    let provenance = Provenance {
        generated_for: fields.text("generatedFor")?,
        target_career: fields.text("targetCareer")?,
        generated_at_utc,
        source_model: fields.text("sourceModel")?,
        is_fallback: fields.boolean("isFallback")?,
        quota_exceeded: fields.boolean("quotaExceeded")?,
        failure_reason: fields.optional_text("failureReason")?,
    };

    not_blank(&child_path(&fields.path, "generatedFor"), &provenance.generated_for)?;
    not_blank(&child_path(&fields.path, "targetCareer"), &provenance.target_career)?;
    not_blank(&child_path(&fields.path, "sourceModel"), &provenance.source_model)?;
    Ok(provenance)
}

/// Check the structural invariants of typed content
pub fn check_content(content: &RoadmapContent) -> ValidationResult<()> {
    let career = &content.career;
    not_blank("career.title", &career.title)?;
    not_blank("career.description", &career.description)?;
    not_blank("career.growthOutlook", &career.growth_outlook)?;
    not_blank("career.salaryRange", &career.salary_range)?;

    length_between("skills", content.skills.len(), MIN_SKILLS, MAX_SKILLS)?;
    for (i, skill) in content.skills.iter().enumerate() {
        not_blank(&child_path(&index_path("skills", i), "name"), &skill.name)?;
    }

    length_between("timeline", content.timeline.len(), TIMELINE_MONTHS, TIMELINE_MONTHS)?;
    let indices: Vec<u8> = content.timeline.iter().map(|m| m.month_index).collect();
    exact_set("timeline.monthIndex", &indices, &MONTH_INDICES)?;
    strictly_ascending("timeline.monthIndex", &indices)?;

    for (i, month) in content.timeline.iter().enumerate() {
        let path = index_path("timeline", i);
        not_blank(&child_path(&path, "title"), &month.title)?;
        not_blank(&child_path(&path, "description"), &month.description)?;

        let tasks_path = child_path(&path, "tasks");
        length_between(&tasks_path, month.tasks.len(), MIN_TASKS_PER_MONTH, MAX_TASKS_PER_MONTH)?;
        for (j, task) in month.tasks.iter().enumerate() {
            let task_path = index_path(&tasks_path, j);
            not_blank(&child_path(&task_path, "title"), &task.title)?;
            not_blank(&child_path(&task_path, "description"), &task.description)?;
            not_blank(&child_path(&task_path, "timeframe"), &task.timeframe)?;
        }
    }

    length_between("courses", content.courses.len(), MIN_COURSES, MAX_COURSES)?;
    for (i, course) in content.courses.iter().enumerate() {
        let path = index_path("courses", i);
        not_blank(&child_path(&path, "title"), &course.title)?;
        not_blank(&child_path(&path, "provider"), &course.provider)?;
        is_web_url(&child_path(&path, "url"), &course.url)?;
    }

    Ok(())
}

/// Validate a model response: everything except provenance
pub fn validate_content(candidate: &Value) -> ValidationResult<RoadmapContent> {
    let root = Fields::of(candidate, "")?;
    let content = parse_content(&root)?;
    check_content(&content)?;
    Ok(content)
}

/// Validate a complete roadmap in wire form, e.g. one reloaded from a host cache
pub fn validate(candidate: &Value) -> ValidationResult<Roadmap> {
    let root = Fields::of(candidate, "")?;
    let content = parse_content(&root)?;
    let provenance = parse_provenance(root.object("provenance")?)?;
    check_content(&content)?;
    Ok(Roadmap::new(content, provenance))
}

/// Re-check an already typed roadmap
pub fn validate_roadmap(roadmap: &Roadmap) -> ValidationResult<()> {
    check_content(roadmap.content())
}

fn text_fields(names: &[&str]) -> Map<String, Value> {
    names
        .iter()
        .map(|name| (name.to_string(), json!({ "type": "string", "minLength": 1 })))
        .collect()
}

fn object_schema(properties: Map<String, Value>) -> Value {
    let required: Vec<String> = properties.keys().cloned().collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// JSON schema of [`RoadmapContent`] declared to structured-output models
pub fn roadmap_json_schema() -> Value {
    let career = object_schema(text_fields(&["title", "description", "growthOutlook", "salaryRange"]));

    let mut skill = text_fields(&["name"]);
    skill.insert("category".into(), json!({ "type": "string", "enum": SkillCategory::WIRE_NAMES }));
    skill.insert("level".into(), json!({ "type": "string", "enum": SkillLevel::WIRE_NAMES }));

    let mut task = text_fields(&["title", "description", "timeframe"]);
    task.insert("priority".into(), json!({ "type": "string", "enum": Priority::WIRE_NAMES }));

    let mut month = text_fields(&["title", "description"]);
    month.insert(
        "monthIndex".into(),
        json!({ "type": "integer", "minimum": 1, "maximum": TIMELINE_MONTHS }),
    );
    month.insert(
        "tasks".into(),
        json!({
            "type": "array",
            "items": object_schema(task),
            "minItems": MIN_TASKS_PER_MONTH,
            "maxItems": MAX_TASKS_PER_MONTH
        }),
    );

    let mut course = text_fields(&["title", "provider", "description", "duration", "rating"]);
    course.insert("url".into(), json!({ "type": "string", "format": "uri" }));

    let mut root = Map::new();
    root.insert("career".into(), career);
    root.insert(
        "skills".into(),
        json!({ "type": "array", "items": object_schema(skill), "minItems": MIN_SKILLS, "maxItems": MAX_SKILLS }),
    );
    root.insert(
        "timeline".into(),
        json!({ "type": "array", "items": object_schema(month), "minItems": TIMELINE_MONTHS, "maxItems": TIMELINE_MONTHS }),
    );
    root.insert(
        "courses".into(),
        json!({ "type": "array", "items": object_schema(course), "minItems": MIN_COURSES, "maxItems": MAX_COURSES }),
    );

    object_schema(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn valid_content() -> Value {
        serde_json::to_value(mock::mock_content("software engineer")).unwrap()
    }

    #[test]
    fn test_mock_content_is_valid() {
        let content = validate_content(&valid_content()).unwrap();
        assert_eq!(content.skills.len(), 12);
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut value = valid_content();
        value["career"].as_object_mut().unwrap().remove("salaryRange");
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::MissingField("career.salaryRange".to_string())
        );
    }

    #[test]
    fn test_null_is_missing() {
        let mut value = valid_content();
        value["skills"][3]["name"] = Value::Null;
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::MissingField("skills[3].name".to_string())
        );
    }

    #[test]
    fn test_wrong_type() {
        let mut value = valid_content();
        value["timeline"] = json!({ "month": 1 });
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::invalid_type("timeline", "array")
        );

        let mut value = valid_content();
        value["timeline"][0]["monthIndex"] = json!("1");
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::invalid_type("timeline[0].monthIndex", "integer")
        );
    }

    #[test]
    fn test_enum_membership() {
        let mut value = valid_content();
        value["skills"][0]["category"] = json!("SoftSkills");
        match validate_content(&value).unwrap_err() {
            ValidationError::InvalidEnumValue { field, value, .. } => {
                assert_eq!(field, "skills[0].category");
                assert_eq!(value, "SoftSkills");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let mut value = valid_content();
        value["timeline"][1]["tasks"][0]["priority"] = json!("urgent");
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::InvalidEnumValue { field, .. } if field == "timeline[1].tasks[0].priority"
        ));
    }

    #[test]
    fn test_skill_count_bounds() {
        let mut value = valid_content();
        value["skills"].as_array_mut().unwrap().truncate(11);
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::CountOutOfRange { field, actual: 11, .. } if field == "skills"
        ));

        let mut value = valid_content();
        let skills = value["skills"].as_array_mut().unwrap();
        let extra: Vec<Value> = skills.iter().take(5).cloned().collect();
        skills.extend(extra);
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::CountOutOfRange { actual: 17, .. }
        ));
    }

    #[test]
    fn test_month_indices_must_be_exact_and_ascending() {
        let mut value = valid_content();
        value["timeline"][5]["monthIndex"] = json!(2);
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::DuplicateValue {
                field: "timeline.monthIndex".to_string(),
                value: "2".to_string()
            }
        );

        let mut value = valid_content();
        value["timeline"][5]["monthIndex"] = json!(7);
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::OutOfRange { field, .. } if field == "timeline.monthIndex"
        ));

        let mut value = valid_content();
        value["timeline"].as_array_mut().unwrap().swap(0, 1);
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::OutOfRange { field, .. } if field == "timeline.monthIndex"
        ));
    }

    #[test]
    fn test_task_count_per_month() {
        let mut value = valid_content();
        value["timeline"][3]["tasks"].as_array_mut().unwrap().truncate(1);
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::CountOutOfRange { field, actual: 1, min: 2, max: 4 } if field == "timeline[3].tasks"
        ));
    }

    #[test]
    fn test_course_url_must_be_web_url() {
        let mut value = valid_content();
        value["courses"][2]["url"] = json!("not a url");
        assert!(matches!(
            validate_content(&value).unwrap_err(),
            ValidationError::InvalidUrl { field, .. } if field == "courses[2].url"
        ));
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut value = valid_content();
        value["career"]["title"] = json!("   ");
        assert_eq!(
            validate_content(&value).unwrap_err(),
            ValidationError::TooShort("career.title".to_string())
        );
    }

    #[test]
    fn test_non_object_root() {
        assert_eq!(
            validate_content(&json!([1, 2])).unwrap_err(),
            ValidationError::invalid_type("", "object")
        );
    }

    #[test]
    fn test_full_roadmap_requires_provenance() {
        let value = valid_content();
        assert_eq!(
            validate(&value).unwrap_err(),
            ValidationError::MissingField("provenance".to_string())
        );

        let roadmap = mock::synthesize("Alex", "data analyst").unwrap();
        let wire = serde_json::to_value(&roadmap).unwrap();
        assert_eq!(validate(&wire).unwrap(), roadmap);
    }

    #[test]
    fn test_schema_declares_bounds_and_enums() {
        let schema = roadmap_json_schema();
        assert_eq!(schema["properties"]["skills"]["minItems"], 12);
        assert_eq!(schema["properties"]["courses"]["maxItems"], 10);
        assert_eq!(
            schema["properties"]["skills"]["items"]["properties"]["category"]["enum"][1],
            "Soft Skills"
        );
        let month = &schema["properties"]["timeline"]["items"];
        assert_eq!(month["properties"]["tasks"]["minItems"], 2);
        assert!(month["required"]
            .as_array()
            .unwrap()
            .contains(&json!("monthIndex")));
    }
}
