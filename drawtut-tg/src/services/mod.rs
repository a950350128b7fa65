//! Pipeline services for tutorial generation

pub mod artifact_store;
pub mod gemini_client;
pub mod narration;
pub mod plan_generator;
pub mod sketch_synthesizer;
pub mod step_estimator;
pub mod step_illustrator;
pub mod tutorial_orchestrator;
pub mod vision_analyzer;

pub use artifact_store::ArtifactStore;
pub use gemini_client::GeminiClient;
pub use narration::{Narrator, PLACEHOLDER_AUDIO};
pub use plan_generator::{PlanGenerator, PLAN_FILLER};
pub use sketch_synthesizer::SketchSynthesizer;
pub use step_estimator::{StepCountEstimator, DEFAULT_STEP_COUNT, MAX_STEPS, MIN_STEPS};
pub use step_illustrator::{RecentStepContext, StepIllustrator, WINDOW_CAPACITY};
pub use tutorial_orchestrator::{PipelineError, TutorialOrchestrator};
pub use vision_analyzer::{AnalysisError, VisionAnalyzer};
