//! Tutorial plan generation
//!
//! Requests a model-authored numbered list of step objectives and
//! normalizes it into exactly the requested number of non-empty
//! instructions. All failure modes are recovered with filler text.

use crate::types::{GenerativeBackend, InlineImage, ModelRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Appended when the model under-produces numbered entries
pub const PLAN_FILLER: &str = "Continue adding details to your drawing.";

/// Generates the ordered list of step objectives
pub struct PlanGenerator {
    backend: Arc<dyn GenerativeBackend>,
}

impl PlanGenerator {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Produce exactly `total_steps` step objectives
    ///
    /// Never fails; a failed call substitutes the fully generic plan.
    pub async fn plan(
        &self,
        sketch: &InlineImage,
        description: &str,
        total_steps: u32,
    ) -> Vec<String> {
        let prompt = format!(
            "Write a step-by-step drawing tutorial plan for the subject described below. \
             The attached image is the finished reference sketch. \
             Produce exactly {} steps as a numbered list (\"1. ...\"), one line per step, \
             each a short imperative instruction. Start from basic shapes and end with \
             final details. No text other than the numbered list.\n\n\
             Subject: {}",
            total_steps, description
        );
        let request = ModelRequest::text(prompt).with_image(sketch.clone());

        match self.backend.generate(request).await {
            Ok(reply) => match reply.first_text() {
                Some(raw) => {
                    let plan = parse_plan(raw, total_steps as usize);
                    info!(steps = plan.len(), "Tutorial plan generated");
                    plan
                }
                None => {
                    warn!("Plan reply contained no text, using generic plan");
                    generic_plan(total_steps)
                }
            },
            Err(e) => {
                warn!(error = %e, "Plan call failed, using generic plan");
                generic_plan(total_steps)
            }
        }
    }
}

/// Parse a numbered list into exactly `total_steps` non-empty entries
///
/// A line contributes iff it starts with `<digits>.`; the numeral, dot,
/// and following whitespace are stripped. Entries keep first-seen order
/// (never re-sorted by numeral). Shortfall is padded with [`PLAN_FILLER`],
/// overflow truncated.
fn parse_plan(raw: &str, total_steps: usize) -> Vec<String> {
    let mut steps = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || !trimmed[digits..].starts_with('.') {
            continue;
        }

        let text = trimmed[digits + 1..].trim();
        if !text.is_empty() {
            steps.push(text.to_string());
        }
    }

    if steps.len() < total_steps {
        warn!(
            parsed = steps.len(),
            requested = total_steps,
            "Plan shortfall, padding with filler"
        );
    }
    steps.truncate(total_steps);
    while steps.len() < total_steps {
        steps.push(PLAN_FILLER.to_string());
    }

    steps
}

/// Fully generic fallback plan
fn generic_plan(total_steps: u32) -> Vec<String> {
    (1..=total_steps)
        .map(|i| format!("Work on part {} of your drawing.", i))
        .collect()
}
