//! Per-step illustration generation
//!
//! Each step image is generated from the step objective, the reference
//! sketch, and a bounded window of recently generated step images.

use crate::models::{ReferenceSketch, StepArtifact};
use crate::services::ArtifactStore;
use crate::types::{GenerativeBackend, InlineImage, ModelRequest};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// How many prior step images the context window retains
pub const WINDOW_CAPACITY: usize = 2;

/// Sliding window of previously generated step images
///
/// FIFO with capacity [`WINDOW_CAPACITY`]; the oldest entry is evicted
/// once capacity is exceeded. Two entries are retained but only
/// [`latest`](Self::latest) is ever consumed as model input; the second
/// slot goes unread (see DESIGN.md before widening this).
#[derive(Debug, Default)]
pub struct RecentStepContext {
    window: VecDeque<InlineImage>,
}

impl RecentStepContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly generated step image, evicting the oldest past capacity
    pub fn push(&mut self, image: InlineImage) {
        if self.window.len() == WINDOW_CAPACITY {
            self.window.pop_front();
        }
        self.window.push_back(image);
    }

    /// The most recently generated step image
    pub fn latest(&self) -> Option<&InlineImage> {
        self.window.back()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// Image-capable model call producing one incremental step illustration
pub struct StepIllustrator {
    backend: Arc<dyn GenerativeBackend>,
    store: ArtifactStore,
}

impl StepIllustrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, store: ArtifactStore) -> Self {
        Self { backend, store }
    }

    /// Generate and persist the illustration for one step
    ///
    /// The prompt conditions on the reference sketch and at most the single
    /// most recent prior step image. Any failure (transport, a reply
    /// without an image part, or artifact I/O) degrades to `None`: the
    /// step record gets a null image URL and the context window is left
    /// untouched.
    pub async fn generate_step(
        &self,
        step_text: &str,
        sketch: &ReferenceSketch,
        context: &RecentStepContext,
        step_number: u32,
        total_steps: u32,
    ) -> Option<StepArtifact> {
        let prompt = step_prompt(step_text, step_number, total_steps, !context.is_empty());

        let mut request = ModelRequest::image(prompt).with_image(sketch.image.clone());
        // Only the most recent prior step is attached, never the full window.
        if let Some(previous) = context.latest() {
            request = request.with_image(previous.clone());
        }

        let reply = match self.backend.generate(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(step = step_number, error = %e, "Step image call failed");
                return None;
            }
        };

        let Some(image) = reply.first_image() else {
            warn!(step = step_number, "Step reply contained no inline image");
            return None;
        };

        let base_name = format!("step{}", step_number);
        match self
            .store
            .store(&image.bytes, &image.mime_type, &base_name)
            .await
        {
            Ok(image_url) => {
                debug!(step = step_number, url = %image_url, "Step image stored");
                Some(StepArtifact {
                    image_url,
                    image: image.clone(),
                })
            }
            Err(e) => {
                warn!(step = step_number, error = %e, "Failed to store step image");
                None
            }
        }
    }
}

/// Constrained incremental-progress prompt for one step
fn step_prompt(step_text: &str, step_number: u32, total_steps: u32, has_previous: bool) -> String {
    let context_clause = if has_previous {
        "The first attached image is the finished reference sketch; the second shows the \
         drawing as completed through the previous step."
    } else {
        "The attached image is the finished reference sketch."
    };

    format!(
        "You are illustrating step {} of {} in a drawing tutorial. {} \
         Show the drawing after completing ONLY this step's objective: {} \
         Do not anticipate later steps. Keep everything already drawn intact, \
         and stay in monochrome pencil style on a white background.",
        step_number, total_steps, context_clause, step_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tag: u8) -> InlineImage {
        InlineImage::new("image/png", vec![tag])
    }

    #[test]
    fn window_retains_at_most_two_entries_fifo() {
        let mut context = RecentStepContext::new();
        context.push(image(1));
        context.push(image(2));
        context.push(image(3));

        assert_eq!(context.len(), 2);
        // Oldest (1) evicted; latest is 3.
        assert_eq!(context.latest().unwrap().bytes, vec![3]);
    }

    #[test]
    fn latest_tracks_most_recent_push() {
        let mut context = RecentStepContext::new();
        assert!(context.latest().is_none());

        context.push(image(7));
        assert_eq!(context.latest().unwrap().bytes, vec![7]);

        context.push(image(8));
        assert_eq!(context.latest().unwrap().bytes, vec![8]);
    }

    #[test]
    fn step_prompt_names_only_this_step() {
        let prompt = step_prompt("Draw the ears.", 4, 12, true);
        assert!(prompt.contains("step 4 of 12"));
        assert!(prompt.contains("ONLY this step's objective: Draw the ears."));
        assert!(prompt.contains("monochrome pencil"));
        assert!(prompt.contains("completed through the previous step"));
    }

    #[test]
    fn first_step_prompt_omits_previous_progress_clause() {
        let prompt = step_prompt("Block in shapes.", 1, 10, false);
        assert!(!prompt.contains("previous step"));
    }
}
