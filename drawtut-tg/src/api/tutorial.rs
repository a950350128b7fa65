//! Tutorial generation API handler
//!
//! POST /api/generate-tutorial: multipart form with an `image` file and a
//! `difficulty` field. Validation failures return 400 before any external
//! call; fatal pipeline failures return 500; everything else degrades
//! inside the pipeline and still returns 200.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::{Difficulty, TutorialResponse, UploadedImage};
use crate::services::TutorialOrchestrator;
use crate::types::InlineImage;
use crate::AppState;

/// Upload size cap for the `image` field
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Multipart framing overhead allowed on top of the image itself
const BODY_LIMIT_SLACK: usize = 512 * 1024;

/// POST /api/generate-tutorial
pub async fn generate_tutorial(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<TutorialResponse>> {
    let mut upload: Option<UploadedImage> = None;
    let mut difficulty_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let original_name = field.file_name().map(str::to_string);
                let declared_mime = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                // Fall back to sniffing when the part carries no content type.
                let mime_type = declared_mime
                    .or_else(|| infer::get(&bytes).map(|kind| kind.mime_type().to_string()))
                    .unwrap_or_else(|| "image/png".to_string());

                upload = Some(UploadedImage {
                    image: InlineImage::new(mime_type, bytes.to_vec()),
                    original_name,
                });
            }
            Some("difficulty") => {
                difficulty_raw = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read difficulty: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let upload = upload
        .filter(|u| !u.image.bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;
    let difficulty_raw = difficulty_raw
        .ok_or_else(|| ApiError::BadRequest("No difficulty provided".to_string()))?;
    let difficulty = Difficulty::parse(&difficulty_raw);

    info!(
        difficulty = difficulty.as_str(),
        upload_bytes = upload.image.bytes.len(),
        "Tutorial request received"
    );

    // Originals are kept; there is no retention policy (see DESIGN.md).
    if let Err(e) = save_upload(&state.uploads_dir, &upload).await {
        warn!(error = %e, "Failed to persist uploaded original");
    }

    let orchestrator = TutorialOrchestrator::new(state.backend.clone(), state.store.clone());
    match orchestrator.generate(&upload.image, difficulty).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            *state.last_error.write().await = Some(e.to_string());
            Err(e.into())
        }
    }
}

/// Persist the raw upload as `<millis-timestamp><original-extension>`
async fn save_upload(uploads_dir: &Path, upload: &UploadedImage) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(uploads_dir).await?;

    let extension = upload
        .original_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".png".to_string());

    let path = uploads_dir.join(format!("{}{}", Utc::now().timestamp_millis(), extension));
    tokio::fs::write(&path, &upload.image.bytes).await?;
    Ok(path)
}

/// Build tutorial generation routes
pub fn tutorial_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generate-tutorial", post(generate_tutorial))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + BODY_LIMIT_SLACK))
}
