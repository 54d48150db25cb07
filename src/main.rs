mod catalog;
mod error;
mod llm;
mod models;
mod normalize;
mod prompt;
mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use routes::{
    generate_ideas, get_component, get_components, get_components_by_category, health_check,
    test_llm, AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::catalog::Catalog;
use crate::llm::LlmClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let llm = LlmClient::from_env();
    if !llm.available() {
        tracing::warn!("EMERGENT_LLM_KEY not set; idea generation will fail until it is configured");
    }

    let state = AppState {
        catalog: Arc::new(Catalog::new()),
        llm: Arc::new(llm),
    };

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/components", get(get_components))
        .route("/api/components/:id", get(get_component))
        .route("/api/components/category/:category", get(get_components_by_category))
        .route("/api/generate-ideas", post(generate_ideas))
        .route("/api/test-llm", get(test_llm))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
