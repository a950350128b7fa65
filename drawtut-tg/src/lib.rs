//! drawtut-tg library interface
//!
//! Exposes the router and application state so integration tests can drive
//! the service in-process with an injected backend.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod types;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use drawtut_common::config::ContentRoot;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::services::ArtifactStore;
use crate::types::GenerativeBackend;

/// Application state shared across handlers
///
/// The generative backend is constructed once at startup and injected
/// here; per-request pipeline state never outlives its handler.
#[derive(Clone)]
pub struct AppState {
    /// Generative model backend
    pub backend: Arc<dyn GenerativeBackend>,
    /// Store for generated artifacts
    pub store: ArtifactStore,
    /// Directory for raw uploaded originals
    pub uploads_dir: PathBuf,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last fatal error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn GenerativeBackend>, content: &ContentRoot) -> Self {
        Self {
            backend,
            store: ArtifactStore::new(content.generated_dir()),
            uploads_dir: content.uploads_dir(),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let generated_dir = state.store.generated_dir().to_path_buf();
    let uploads_dir = state.uploads_dir.clone();

    Router::new()
        .merge(api::tutorial_routes())
        .merge(api::health_routes())
        // Uploaded originals and generated artifacts are served statically
        // under fixed prefixes.
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service("/generated", ServeDir::new(generated_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
