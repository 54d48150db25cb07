use serde_json::{Map, Value};

/// Generation parameters pulled out of the request's open preference map,
/// with a fixed default for every field.
#[derive(Debug, Clone)]
pub struct Preferences {
    pub theme: String,
    pub skill_level: String,
    pub count: u32,
    pub duration: String,
    pub team_size: String,
}

impl Preferences {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            theme: str_pref(map, "theme", "General"),
            skill_level: str_pref(map, "skillLevel", "Beginner"),
            count: count_pref(map),
            duration: str_pref(map, "duration", "1-2 hours"),
            team_size: str_pref(map, "teamSize", "Individual"),
        }
    }
}

fn str_pref(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

// The frontend sends `count` as a number, but a numeric string is accepted.
fn count_pref(map: &Map<String, Value>) -> u32 {
    match map.get("count") {
        Some(Value::Number(n)) => n.as_u64().map(|n| n as u32).unwrap_or(5),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(5),
        _ => 5,
    }
}

/// Name of each selected component; entries without a `name` field are
/// rendered as their raw JSON so nothing is silently dropped.
pub fn component_names(selected: &[Value]) -> Vec<String> {
    selected
        .iter()
        .map(|c| {
            c.get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| c.to_string())
        })
        .collect()
}

/// One deterministic instruction string per request: component list,
/// context block, reasoning checklist, and the exact JSON shape the
/// normalizer expects back.
pub fn build_user_prompt(names: &[String], prefs: &Preferences) -> String {
    let components_str = names.join(", ");
    let Preferences {
        theme,
        skill_level,
        count,
        duration,
        team_size,
    } = prefs;

    format!(
        r#"Using your reasoning capabilities, analyze these components and create {count} innovative electronics project ideas: {components_str}

Project Context & Requirements:
- Theme Focus: {theme}
- Target Skill Level: {skill_level}
- Project Duration: {duration}
- Team Configuration: {team_size}
- Priority: Educational value + practical real-world application

Think through each project systematically:
1. What real problem can these components solve?
2. How do the components work together technically?
3. What makes this project innovative and educational?
4. Is it appropriate for the {skill_level} skill level?
5. What can be learned from building this?

Required JSON Response Format:
{{
  "projects": [
    {{
      "title": "Creative and descriptive project name",
      "description": "Clear 2-3 sentence overview of what the project does",
      "problem_statement": "Specific real-world problem this project addresses",
      "working_principle": "Technical explanation of how the system operates",
      "components": ["Array", "of", "required", "components", "from", "available", "list"],
      "difficulty": "{skill_level}",
      "estimated_cost": "₹realistic cost range based on components",
      "innovation_elements": ["unique", "creative", "features"],
      "scalability_options": ["ways", "to", "expand", "the", "project"],
      "learning_outcomes": ["specific", "skills", "and", "concepts", "learned"],
      "tags": ["relevant", "technical", "keywords"]
    }}
  ]
}}

Quality Requirements for Each Project:
✅ Technically feasible with given components
✅ Educationally valuable for {skill_level} makers
✅ Solves a genuine real-world problem
✅ Creative and engaging to build
✅ Clear learning progression and outcomes
✅ Appropriate complexity for {duration} timeframe
✅ Suitable for {team_size} work style

Use your reasoning to ensure each project meets all these criteria."#
    )
}
