//! Step count estimation
//!
//! Classifies subject complexity into a step count. Every failure mode is
//! recovered: an unusable reply substitutes the default count.

use crate::types::{GenerativeBackend, InlineImage, ModelRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Inclusive step count bounds
pub const MIN_STEPS: u32 = 8;
pub const MAX_STEPS: u32 = 20;
/// Substituted when the reply cannot be parsed or is out of range
pub const DEFAULT_STEP_COUNT: u32 = 12;

/// Complexity classifier over the reference sketch + description
pub struct StepCountEstimator {
    backend: Arc<dyn GenerativeBackend>,
}

impl StepCountEstimator {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Estimate how many tutorial steps this subject needs
    ///
    /// Never fails; any backend error or unusable reply degrades to
    /// [`DEFAULT_STEP_COUNT`].
    pub async fn estimate(&self, sketch: &InlineImage, description: &str) -> u32 {
        let prompt = format!(
            "A drawing tutorial is being prepared for the subject described below. \
             Based on its complexity, how many steps should the tutorial have? \
             Respond with a single integer between {} and {}. No other text.\n\n\
             Subject: {}",
            MIN_STEPS, MAX_STEPS, description
        );
        let request = ModelRequest::text(prompt).with_image(sketch.clone());

        let raw = match self.backend.generate(request).await {
            Ok(reply) => reply.first_text().map(str::to_string),
            Err(e) => {
                warn!(error = %e, "Step count call failed, using default");
                None
            }
        };

        match raw.as_deref().and_then(parse_step_count) {
            Some(count) => {
                info!(steps = count, "Step count estimated");
                count
            }
            None => {
                if let Some(raw) = raw {
                    warn!(raw = %raw, default = DEFAULT_STEP_COUNT, "Unusable step count reply");
                }
                DEFAULT_STEP_COUNT
            }
        }
    }
}

/// Parse a bare integer reply, rejecting anything outside [MIN_STEPS, MAX_STEPS]
fn parse_step_count(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|count| (MIN_STEPS..=MAX_STEPS).contains(count))
}
