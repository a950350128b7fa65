//! Shared plumbing for the DrawTut services
//!
//! Configuration resolution and common error types used by the tutorial
//! generator service.

pub mod config;
pub mod error;

pub use error::{Error, Result};
