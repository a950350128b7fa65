//! Tutorial request and response models

use crate::types::InlineImage;
use serde::Serialize;

/// Requested tutorial difficulty
///
/// Parsed case-insensitively from the upload form; anything outside the
/// three named levels becomes [`Difficulty::Unspecified`], which keeps the
/// generic sketch instruction without a level-specific style clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Unspecified,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Unspecified => "unspecified",
        }
    }
}

/// Raw uploaded image, ephemeral and owned by the request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Image bytes with their declared (or sniffed) MIME type
    pub image: InlineImage,
    /// Client-side filename, used only for the stored upload's extension
    pub original_name: Option<String>,
}

/// The monochrome reference sketch derived once per request
///
/// Read-only after creation; its bytes are attached to every subsequent
/// generation call as shared visual context.
#[derive(Debug, Clone)]
pub struct ReferenceSketch {
    /// Public path of the persisted sketch artifact
    pub image_url: String,
    /// Raw sketch bytes, reused as model input
    pub image: InlineImage,
}

/// One persisted step illustration
#[derive(Debug, Clone)]
pub struct StepArtifact {
    pub image_url: String,
    pub image: InlineImage,
}

/// Sketch portion of the response payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchSection {
    pub image_url: String,
    pub description: String,
    pub audio: Option<String>,
}

/// One tutorial step in the response payload
///
/// `step` is 1-based and contiguous; `audio` is attached in a second pass
/// after all step images are generated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub step: u32,
    pub description: String,
    pub image_url: Option<String>,
    pub audio: Option<String>,
}

/// Final tutorial payload; immutable once assembled
#[derive(Debug, Clone, Serialize)]
pub struct TutorialResponse {
    pub sketch: SketchSection,
    pub steps: Vec<StepRecord>,
}
