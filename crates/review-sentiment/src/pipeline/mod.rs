//! Pipeline module.
//!
//! This module provides the main review pipeline and related components.

mod builder;
mod executor;
pub mod progress;

pub use builder::{ExportOutput, Pipeline, PipelineBuilder};
pub use executor::CleaningExecutor;
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
