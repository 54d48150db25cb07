use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    catalog::Catalog,
    error::AppError,
    llm::LlmClient,
    models::{Component, GenerationRequest, HealthResponse, IdeaResponse},
    normalize::normalize_reply,
    prompt::{build_user_prompt, component_names, Preferences},
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub llm: Arc<LlmClient>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        emergent_llm_available: state.llm.available(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_components(State(state): State<AppState>) -> Json<Vec<Component>> {
    Json(state.catalog.all().to_vec())
}

pub async fn get_component(
    Path(component_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Component>, AppError> {
    state
        .catalog
        .by_id(&component_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::ComponentNotFound)
}

pub async fn get_components_by_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<Component>> {
    Json(state.catalog.by_category(&category))
}

pub async fn generate_ideas(
    State(state): State<AppState>,
    Json(body): Json<GenerationRequest>,
) -> Result<Json<Vec<IdeaResponse>>, AppError> {
    let prefs = Preferences::from_map(&body.preferences);
    let names = component_names(&body.selected_components);

    info!("🚀 Generating {} ideas for components: {}", prefs.count, names.join(", "));

    let prompt = build_user_prompt(&names, &prefs);
    let reply = state.llm.send(&prompt).await?;

    let ideas = normalize_reply(&reply, &names, &prefs).map_err(|e| {
        error!("❌ JSON parse error: {e}. Raw response: {reply}");
        AppError::from(e)
    })?;

    info!("✅ Generated {} ideas", ideas.len());
    Ok(Json(ideas))
}

/// Connectivity probe. Always answers 200; failures are reported in the
/// body so the frontend can show the reason.
pub async fn test_llm(State(state): State<AppState>) -> Json<Value> {
    match state.llm.send("Say 'Connection successful' and nothing else.").await {
        Ok(response) => Json(json!({
            "success": true,
            "message": "LLM connection successful",
            "response": response,
            "model": state.llm.model(),
        })),
        Err(e) => {
            error!("❌ LLM connection test failed: {e}");
            Json(json!({
                "success": false,
                "message": format!("Connection failed: {e}"),
                "error": e.to_string(),
            }))
        }
    }
}
