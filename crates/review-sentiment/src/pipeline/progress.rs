//! Progress reporting for the review pipeline.
//!
//! The pipeline emits a [`ProgressUpdate`] at every stage boundary. Callers
//! receive them through a [`ProgressReporter`], usually a closure passed to
//! [`PipelineBuilder::on_progress`](super::PipelineBuilder::on_progress).
//!
//! # Example
//!
//! ```rust,ignore
//! use review_sentiment::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .process(df);
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the review pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Reading the input file
    Loading,
    /// Normalizing column names
    Normalizing,
    /// Dropping records with a missing or negative age
    Filtering,
    /// Clamping satisfaction into range
    Clamping,
    /// Imputing missing values
    Imputation,
    /// Deriving the rolling sentiment average
    RollingAverage,
    /// Statistics, extremes and brand correlation
    Analysis,
    /// Writing charts and the cleaned dataset
    Export,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Normalizing => "Normalizing Columns",
            Self::Filtering => "Filtering Records",
            Self::Clamping => "Clamping Satisfaction",
            Self::Imputation => "Imputing Values",
            Self::RollingAverage => "Computing Rolling Average",
            Self::Analysis => "Analyzing Sentiment",
            Self::Export => "Exporting Results",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the typical weight of this stage in the overall pipeline (0.0 - 1.0).
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.15,
            Self::Normalizing => 0.05,
            Self::Filtering => 0.10,
            Self::Clamping => 0.05,
            Self::Imputation => 0.15,
            Self::RollingAverage => 0.10,
            Self::Analysis => 0.15,
            Self::Export => 0.25,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Normalizing => 0.15,
            Self::Filtering => 0.20,
            Self::Clamping => 0.30,
            Self::Imputation => 0.35,
            Self::RollingAverage => 0.50,
            Self::Analysis => 0.60,
            Self::Export => 0.75,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PipelineStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: PipelineStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: PipelineStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so a configured pipeline can be
/// moved to a worker thread.
pub trait ProgressReporter: Send + Sync {
    /// Called at every stage boundary.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
