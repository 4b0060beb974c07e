// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chat_service::ChatService;
use crate::application::text_generator::{GenerationParams, TextGenerator};
use crate::application::trends_service::TrendsService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::vertex_client::VertexGenerator;
use crate::presentation::app_state::{AppState, ModelTarget};
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create the model client once and share it (infrastructure layer)
    let vertex = VertexGenerator::new(&config.vertex)?;
    tracing::info!("Vertex AI endpoint: {}", vertex.url());
    let generator: Arc<dyn TextGenerator> = Arc::new(vertex);

    // Create services (application layer)
    let chat_service = ChatService::new(
        generator.clone(),
        GenerationParams::from(&config.generation),
    );
    let trends_service = TrendsService::new(generator);

    // Create application state
    let state = Arc::new(AppState {
        chat_service,
        trends_service,
        model_target: ModelTarget {
            project_id: config.vertex.project_id.clone(),
            location: config.vertex.location.clone(),
            model: config.vertex.model.clone(),
        },
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr().parse()?;
    tracing::info!(
        "Starting agent-dash on {} (project {}, location {})",
        addr,
        config.vertex.project_id,
        config.vertex.location
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
