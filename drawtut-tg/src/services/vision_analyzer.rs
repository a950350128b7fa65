//! Vision analysis of the uploaded image
//!
//! Produces the free-text subject description that seeds step counting and
//! planning. Analysis failure is fatal for the whole request: no fallback
//! description is defined (see DESIGN.md).

use crate::types::{GenerativeBackend, InlineImage, ModelError, ModelRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const ANALYZE_PROMPT: &str = "Describe the main subject of this image for an artist who is \
about to draw it: the overall shapes, the proportions, and the key features that make the \
subject recognizable. Keep the description under 120 words.";

/// Vision analyzer errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis call failed: {0}")]
    Model(#[from] ModelError),

    #[error("Analysis returned no description text")]
    NoDescription,
}

/// Description-capable model call over the uploaded image
pub struct VisionAnalyzer {
    backend: Arc<dyn GenerativeBackend>,
}

impl VisionAnalyzer {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Describe the uploaded image
    pub async fn analyze(&self, image: &InlineImage) -> Result<String, AnalysisError> {
        let request = ModelRequest::text(ANALYZE_PROMPT).with_image(image.clone());
        let reply = self.backend.generate(request).await?;

        let description = reply
            .first_text()
            .ok_or(AnalysisError::NoDescription)?
            .trim()
            .to_string();

        info!(chars = description.len(), "Image analysis complete");
        Ok(description)
    }
}
