//! Tutorial generation orchestrator
//!
//! Sequences the end-to-end pipeline for one request:
//!
//! sketch → analyze → estimate step count → plan → (step image)×N →
//! narrate overview → narrate steps → assemble response
//!
//! The chain is strictly sequential: each call's prompt depends on the
//! previous call's output, so there is no fan-out to exploit. All state is
//! owned by this request; nothing is shared across requests except the
//! artifact directory.

use crate::models::{Difficulty, SketchSection, StepRecord, TutorialResponse};
use crate::services::{
    ArtifactStore, Narrator, PlanGenerator, RecentStepContext, SketchSynthesizer,
    StepCountEstimator, StepIllustrator, VisionAnalyzer,
};
use crate::types::{GenerativeBackend, InlineImage};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal pipeline failures
///
/// Everything not represented here degrades inside its component: a
/// default step count, filler plan entries, or a null step image.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model produced no reference sketch; nothing downstream can run
    #[error("Reference sketch could not be generated")]
    MissingSketch,

    /// Sketch synthesis or persistence failed outright
    #[error("Sketch stage failed: {0}")]
    Sketch(#[from] drawtut_common::Error),

    /// Image analysis failed; no fallback description is defined
    #[error("Image analysis failed: {0}")]
    Analysis(#[from] crate::services::AnalysisError),
}

/// Sequences one tutorial request through the full pipeline
pub struct TutorialOrchestrator {
    synthesizer: SketchSynthesizer,
    analyzer: VisionAnalyzer,
    estimator: StepCountEstimator,
    planner: PlanGenerator,
    illustrator: StepIllustrator,
    narrator: Narrator,
}

impl TutorialOrchestrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, store: ArtifactStore) -> Self {
        Self {
            synthesizer: SketchSynthesizer::new(backend.clone(), store.clone()),
            analyzer: VisionAnalyzer::new(backend.clone()),
            estimator: StepCountEstimator::new(backend.clone()),
            planner: PlanGenerator::new(backend.clone()),
            illustrator: StepIllustrator::new(backend, store),
            narrator: Narrator::new(),
        }
    }

    /// Run the full pipeline for one uploaded image
    pub async fn generate(
        &self,
        upload: &InlineImage,
        difficulty: Difficulty,
    ) -> Result<TutorialResponse, PipelineError> {
        let sketch = self
            .synthesizer
            .synthesize(upload, difficulty)
            .await?
            .ok_or(PipelineError::MissingSketch)?;

        let description = self.analyzer.analyze(upload).await?;

        let total_steps = self.estimator.estimate(&sketch.image, &description).await;
        let plan = self
            .planner
            .plan(&sketch.image, &description, total_steps)
            .await;

        // Steps are generated strictly in order: step i conditions only on
        // the reference sketch and step i-1's image.
        let mut context = RecentStepContext::new();
        let mut steps = Vec::with_capacity(plan.len());

        for (index, objective) in plan.iter().enumerate() {
            let step_number = index as u32 + 1;
            let artifact = self
                .illustrator
                .generate_step(objective, &sketch, &context, step_number, total_steps)
                .await;

            let image_url = match artifact {
                Some(artifact) => {
                    let url = artifact.image_url;
                    context.push(artifact.image);
                    Some(url)
                }
                None => {
                    warn!(step = step_number, "Continuing without a step image");
                    None
                }
            };

            steps.push(StepRecord {
                step: step_number,
                description: objective.clone(),
                image_url,
                audio: None,
            });
        }

        // Narration is attached after all images exist: overview first,
        // then each step in order.
        let sketch_audio = self.narrator.narrate(&description);
        for record in &mut steps {
            record.audio = Some(self.narrator.narrate(&record.description));
        }

        info!(
            steps = steps.len(),
            with_images = steps.iter().filter(|s| s.image_url.is_some()).count(),
            "Tutorial assembled"
        );

        Ok(TutorialResponse {
            sketch: SketchSection {
                image_url: sketch.image_url,
                description,
                audio: Some(sketch_audio),
            },
            steps,
        })
    }
}
