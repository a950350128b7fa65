//! Reference sketch synthesis
//!
//! Converts the uploaded image into the single monochrome pencil sketch
//! every later generation call uses as shared context.

use crate::models::{Difficulty, ReferenceSketch};
use crate::services::ArtifactStore;
use crate::types::{GenerativeBackend, InlineImage, ModelRequest};
use drawtut_common::{Error, Result};
use std::sync::Arc;
use tracing::{info, warn};

const BASE_INSTRUCTION: &str = "Convert this image into a clean monochrome pencil sketch \
on a white background, keeping the main subject clearly recognizable.";

/// Level-specific style clause, always monochrome pencil
fn style_instruction(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => {
            "Use simple, bold outlines with minimal detail, suitable for a beginner artist."
        }
        Difficulty::Intermediate => {
            "Use moderate detail with visible construction lines and basic shading."
        }
        Difficulty::Advanced => {
            "Use fine detail, accurate proportions, and full tonal shading."
        }
        Difficulty::Unspecified => "",
    }
}

/// Full sketch prompt for a difficulty level
pub(crate) fn sketch_prompt(difficulty: Difficulty) -> String {
    let style = style_instruction(difficulty);
    if style.is_empty() {
        BASE_INSTRUCTION.to_string()
    } else {
        format!("{} {}", style, BASE_INSTRUCTION)
    }
}

/// Image-capable model call producing the reference sketch
pub struct SketchSynthesizer {
    backend: Arc<dyn GenerativeBackend>,
    store: ArtifactStore,
}

impl SketchSynthesizer {
    pub fn new(backend: Arc<dyn GenerativeBackend>, store: ArtifactStore) -> Self {
        Self { backend, store }
    }

    /// Synthesize and persist the reference sketch
    ///
    /// A reply without an inline image part yields `Ok(None)` rather than
    /// an error; the orchestrator treats `None` as fatal. Transport errors
    /// and artifact I/O errors propagate.
    pub async fn synthesize(
        &self,
        upload: &InlineImage,
        difficulty: Difficulty,
    ) -> Result<Option<ReferenceSketch>> {
        let request = ModelRequest::image(sketch_prompt(difficulty)).with_image(upload.clone());
        let reply = self
            .backend
            .generate(request)
            .await
            .map_err(|e| Error::Internal(format!("sketch synthesis: {}", e)))?;

        let Some(image) = reply.first_image() else {
            warn!(
                difficulty = difficulty.as_str(),
                "Sketch reply contained no inline image"
            );
            return Ok(None);
        };

        let image_url = self
            .store
            .store(&image.bytes, &image.mime_type, "sketch")
            .await?;

        info!(
            difficulty = difficulty.as_str(),
            url = %image_url,
            "Reference sketch generated"
        );

        Ok(Some(ReferenceSketch {
            image_url,
            image: image.clone(),
        }))
    }
}
