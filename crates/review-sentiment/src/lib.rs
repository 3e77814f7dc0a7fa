//! Review Sentiment Pipeline Library
//!
//! Cleans a dataset of product reviews and summarizes the sentiment it
//! carries, built with Rust and Polars.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Loading**: spreadsheet workbooks (via calamine) and delimited text files
//! - **Cleaning**: column name normalization, invalid-age filtering, satisfaction clamping
//! - **Imputation**: mean, review placeholder and generic placeholder, in that order
//! - **Analysis**: rolling average, mean/median/std, extreme reviews, brand correlation
//! - **Output**: cleaned CSV, PNG charts, console and JSON reports
//! - **Progress Reporting**: updates at every stage boundary
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use review_sentiment::{Pipeline, PipelineConfig, render_console_report};
//!
//! let pipeline = Pipeline::builder()
//!     .config(PipelineConfig::default())
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//!
//! let mut result = pipeline.run("Product_reviews.xlsx")?;
//! println!("{}", render_console_report(&result));
//!
//! // Charts first, then the cleaned CSV
//! pipeline.export(&mut result)?;
//! ```
//!
//! # Configuration
//!
//! Use [`PipelineConfig`] to customize the pipeline:
//!
//! ```rust,ignore
//! use review_sentiment::config::*;
//!
//! let config = PipelineConfig::builder()
//!     .rolling_window(5)
//!     .mean_fallback(MeanFallback::Zero)
//!     .output_dir("results")
//!     .generate_charts(false)
//!     .build()?;
//! ```
//!
//! # Using the stages directly
//!
//! Every stage is a free function over a Polars `DataFrame`:
//!
//! ```rust,ignore
//! use review_sentiment::analysis::{add_rolling_average, sentiment_statistics};
//! use review_sentiment::cleaner::normalize_column_names;
//!
//! normalize_column_names(&mut df)?;
//! add_rolling_average(&mut df, 3)?;
//! let stats = sentiment_statistics(&df)?;
//! ```

pub mod analysis;
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartData, ChartRenderer};
pub use cleaner::DataCleaner;
pub use config::{ConfigValidationError, MeanFallback, PipelineConfig, PipelineConfigBuilder};
pub use error::{Result as ReviewResult, ResultExt, ReviewError};
pub use imputers::StatisticalImputer;
pub use loader::{InputFormat, load_dataset};
pub use pipeline::{
    ClosureProgressReporter, CleaningExecutor, ExportOutput, Pipeline, PipelineBuilder,
    PipelineStage, ProgressReporter, ProgressUpdate,
};
pub use reporting::{AnalysisReport, ReportGenerator, render_console_report};
pub use types::{
    BrandCorrelation, BrandMean, ExtremeRecords, PipelineResult, ProcessingSummary, ReviewRecord,
    SentimentStatistics,
};
