//! Narration stub
//!
//! Placeholder for a text-to-speech integration: always returns the same
//! reference without synthesizing audio. A real implementation would call
//! a speech service here and store the result as an artifact.

use tracing::debug;

/// The constant reference returned for every narration request
pub const PLACEHOLDER_AUDIO: &str = "placeholder-audio.mp3";

/// Stubbed text-to-speech substitute
#[derive(Debug, Default)]
pub struct Narrator;

impl Narrator {
    pub fn new() -> Self {
        Self
    }

    /// Always succeeds with the placeholder reference
    pub fn narrate(&self, text: &str) -> String {
        let preview: String = text.chars().take(60).collect();
        debug!(preview = %preview, "Narration stubbed");
        PLACEHOLDER_AUDIO.to_string()
    }
}
