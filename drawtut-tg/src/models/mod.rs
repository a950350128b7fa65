//! Data models for tutorial generation

pub mod tutorial;

pub use tutorial::{
    Difficulty, ReferenceSketch, SketchSection, StepArtifact, StepRecord, TutorialResponse,
    UploadedImage,
};
