use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
}

fn default_model_id() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationRequest {
    /// Loosely typed on purpose: the frontend sends whatever shape its
    /// component picker holds, and only `name` is read from each entry.
    pub selected_components: Vec<Value>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    #[serde(default = "default_model_id")]
    pub model_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdeaResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub problem_statement: String,
    pub working_principle: String,
    pub components: Vec<String>,
    pub difficulty: String,
    pub estimated_cost: String,
    pub innovation_elements: Vec<String>,
    pub scalability_options: Vec<String>,
    pub learning_outcomes: Vec<String>,
    pub tags: Vec<String>,
    pub availability: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub generated_by: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub emergent_llm_available: bool,
    pub version: String,
}
