use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use crate::llm::MODEL;
use crate::models::IdeaResponse;
use crate::prompt::Preferences;

#[derive(Debug, Error)]
pub enum NormalizeError {
    // The raw reply is logged by the caller; the client only sees this.
    #[error("Failed to parse AI response")]
    InvalidJson(#[source] serde_json::Error),
}

/// Turn the model's raw reply into idea records. The reply must be valid
/// JSON; each entry of its `projects` array is mapped field by field, with
/// absent fields replaced by defaults drawn from the request (component
/// names, skill level, theme) or fixed literals. A present field of the
/// wrong shape is coerced to a string where possible, otherwise it falls
/// back to the default as well.
pub fn normalize_reply(
    raw: &str,
    component_names: &[String],
    prefs: &Preferences,
) -> Result<Vec<IdeaResponse>, NormalizeError> {
    let parsed: Value = serde_json::from_str(raw).map_err(NormalizeError::InvalidJson)?;
    let projects = match parsed.get("projects").and_then(Value::as_array) {
        Some(list) => list.as_slice(),
        None => &[],
    };

    let stamp = Utc::now();
    let ts = stamp.timestamp();

    Ok(projects
        .iter()
        .enumerate()
        .map(|(i, project)| IdeaResponse {
            id: format!("generated_{ts}_{i}"),
            title: str_field(project, "title", &format!("Untitled Project {}", i + 1)),
            description: str_field(project, "description", "No description provided"),
            problem_statement: str_field(project, "problem_statement", ""),
            working_principle: str_field(project, "working_principle", ""),
            components: list_field(project, "components", || component_names.to_vec()),
            difficulty: str_field(project, "difficulty", &prefs.skill_level),
            estimated_cost: str_field(project, "estimated_cost", "₹500-1000"),
            innovation_elements: list_field(project, "innovation_elements", Vec::new),
            scalability_options: list_field(project, "scalability_options", Vec::new),
            learning_outcomes: list_field(project, "learning_outcomes", Vec::new),
            tags: list_field(project, "tags", || {
                vec![prefs.theme.clone(), prefs.skill_level.clone()]
            }),
            availability: "Available".to_string(),
            is_favorite: false,
            created_at: stamp,
            updated_at: stamp,
            generated_by: MODEL.to_string(),
        })
        .collect())
}

fn str_field(project: &Value, key: &str, default: &str) -> String {
    match project.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

fn list_field(project: &Value, key: &str, default: impl FnOnce() -> Vec<String>) -> Vec<String> {
    match project.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        None => default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn beginner_prefs() -> Preferences {
        Preferences {
            theme: "General".into(),
            skill_level: "Beginner".into(),
            count: 5,
            duration: "1-2 hours".into(),
            team_size: "Individual".into(),
        }
    }

    fn names() -> Vec<String> {
        vec!["Arduino Uno".to_string(), "LED".to_string()]
    }

    #[test]
    fn well_formed_projects_map_one_to_one() {
        let raw = json!({
            "projects": [
                {
                    "title": "Smart Plant Monitor",
                    "description": "Monitors soil moisture.",
                    "problem_statement": "Plants die from neglect.",
                    "working_principle": "Sensor drives an alert LED.",
                    "components": ["Arduino Uno", "LED"],
                    "difficulty": "Intermediate",
                    "estimated_cost": "₹800-1200",
                    "innovation_elements": ["auto watering"],
                    "scalability_options": ["add WiFi"],
                    "learning_outcomes": ["analog input"],
                    "tags": ["iot", "plants"]
                },
                { "title": "Night Light" }
            ]
        })
        .to_string();

        let ideas = normalize_reply(&raw, &names(), &beginner_prefs()).unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].title, "Smart Plant Monitor");
        assert_eq!(ideas[0].difficulty, "Intermediate");
        assert_eq!(ideas[0].tags, vec!["iot", "plants"]);
        assert_eq!(ideas[1].title, "Night Light");
        assert_ne!(ideas[0].id, ideas[1].id);
    }

    #[test]
    fn synthetic_ids_carry_the_array_position() {
        let raw = json!({ "projects": [{}, {}, {}] }).to_string();
        let ideas = normalize_reply(&raw, &names(), &beginner_prefs()).unwrap();
        assert_eq!(ideas.len(), 3);
        for (i, idea) in ideas.iter().enumerate() {
            assert!(idea.id.starts_with("generated_"));
            assert!(idea.id.ends_with(&format!("_{i}")));
        }
    }

    #[test]
    fn missing_fields_take_documented_defaults() {
        let raw = json!({ "projects": [{ "title": "Bare" }] }).to_string();
        let ideas = normalize_reply(&raw, &names(), &beginner_prefs()).unwrap();
        let idea = &ideas[0];

        assert_eq!(idea.description, "No description provided");
        assert_eq!(idea.problem_statement, "");
        assert_eq!(idea.working_principle, "");
        assert_eq!(idea.components, names());
        assert_eq!(idea.difficulty, "Beginner");
        assert_eq!(idea.estimated_cost, "₹500-1000");
        assert!(idea.innovation_elements.is_empty());
        assert!(idea.scalability_options.is_empty());
        assert!(idea.learning_outcomes.is_empty());
        assert_eq!(idea.tags, vec!["General", "Beginner"]);
        assert_eq!(idea.availability, "Available");
        assert!(!idea.is_favorite);
        assert_eq!(idea.generated_by, "gpt-4o-mini");
    }

    #[test]
    fn untitled_projects_are_numbered_from_one() {
        let raw = json!({ "projects": [{}, {}] }).to_string();
        let ideas = normalize_reply(&raw, &names(), &beginner_prefs()).unwrap();
        assert_eq!(ideas[0].title, "Untitled Project 1");
        assert_eq!(ideas[1].title, "Untitled Project 2");
    }

    #[test]
    fn invalid_json_is_rejected_without_records() {
        let err = normalize_reply("Sure! Here are some ideas:", &names(), &beginner_prefs())
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse AI response");
    }

    #[test]
    fn missing_projects_key_yields_empty_list() {
        let ideas = normalize_reply("{}", &names(), &beginner_prefs()).unwrap();
        assert!(ideas.is_empty());
    }

    #[test]
    fn malformed_fields_are_coerced_or_defaulted() {
        let raw = json!({
            "projects": [{
                "title": 42,
                "components": "just a string",
                "tags": ["ok", 7]
            }]
        })
        .to_string();

        let ideas = normalize_reply(&raw, &names(), &beginner_prefs()).unwrap();
        let idea = &ideas[0];
        // Scalar under a string field keeps its rendered value.
        assert_eq!(idea.title, "42");
        // Non-array under a list field falls back to the default.
        assert_eq!(idea.components, names());
        // Non-string list elements are rendered, not dropped.
        assert_eq!(idea.tags, vec!["ok", "7"]);
    }

    #[test]
    fn single_project_reply_echoes_request_components() {
        let raw = json!({
            "projects": [{
                "title": "Blink Pattern Trainer",
                "description": "Teaches timing basics with one LED."
            }]
        })
        .to_string();

        let request_names = vec!["Arduino Uno".to_string()];
        let ideas = normalize_reply(&raw, &request_names, &beginner_prefs()).unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].components, vec!["Arduino Uno"]);
    }
}
