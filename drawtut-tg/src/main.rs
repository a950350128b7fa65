//! drawtut-tg - Drawing Tutorial Generator service
//!
//! Accepts an uploaded image plus a difficulty level and assembles a
//! multi-step pencil-drawing tutorial by orchestrating a sequence of
//! generative model calls.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use drawtut_common::config::{ContentRoot, ServiceConfig};
use drawtut_tg::services::GeminiClient;
use drawtut_tg::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting drawtut-tg (Drawing Tutorial Generator)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve configuration (ENV -> TOML -> defaults)
    let config = ServiceConfig::resolve()?;

    // Step 2: Create content directories if missing
    let content = ContentRoot::new(config.content_root.clone());
    content.ensure_directories()?;

    // Step 3: Construct the generative backend once; handlers share it
    let backend = GeminiClient::new(config.api_key.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize generative backend: {}", e))?;
    info!("Generative backend initialized");

    // Create application state and router
    let state = AppState::new(Arc::new(backend), &content);
    let app = drawtut_tg::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("Listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
