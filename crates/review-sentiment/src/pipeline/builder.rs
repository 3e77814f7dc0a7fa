//! Main review pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the review analysis workflow.

use crate::analysis::{brand_correlation, find_extremes, sentiment_statistics};
use crate::charts::{ChartData, ChartRenderer};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::load_dataset;
use crate::pipeline::executor::CleaningExecutor;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::reporting::ReportGenerator;
use crate::types::{PipelineResult, ProcessingSummary};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Files written by [`Pipeline::export`].
#[derive(Debug, Default)]
pub struct ExportOutput {
    /// The cleaned CSV, if written.
    pub dataset: Option<PathBuf>,
    /// Chart images written.
    pub charts: Vec<PathBuf>,
    /// Chart series, if charts were requested.
    pub chart_data: Option<ChartData>,
}

/// The main review pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use review_sentiment::{Pipeline, PipelineConfig};
///
/// let mut result = Pipeline::builder()
///     .config(PipelineConfig::builder().rolling_window(5).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run("Product_reviews.xlsx")?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    reporter: ReportGenerator,
    charts: ChartRenderer,
}

// Ensure Pipeline is Send (can be moved to another thread)
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a file and process it.
    ///
    /// Nothing is written to disk; call [`export`](Self::export) on the result.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Loading,
            0.0,
            format!("Loading {}", path.as_ref().display()),
        ));

        let df = match load_dataset(path) {
            Ok(df) => df,
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                return Err(e);
            }
        };

        self.process(df)
    }

    /// Process a DataFrame through the cleaning and analysis stages.
    ///
    /// Returns a `PipelineResult` containing the cleaned data and the
    /// analysis outputs.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn process_internal(&self, mut df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting review pipeline...");

        let mut summary = ProcessingSummary::new();

        let executor = CleaningExecutor::new(&self.config);
        executor.execute(&mut df, &mut summary, &|stage, message| {
            self.report_progress(ProgressUpdate::new(stage, 0.0, message));
        })?;

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Analysis,
            0.0,
            "Computing statistics, extremes and brand correlation",
        ));
        info!("Analyzing sentiment...");

        let statistics = sentiment_statistics(&df)?;
        let extremes = find_extremes(&df)?;
        let correlation = brand_correlation(&df)?;

        match &statistics {
            Some(stats) => info!(
                "Mean satisfaction {:.2} over {} records",
                stats.mean, stats.count
            ),
            None => warn!("No satisfaction values left, statistics are undefined"),
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Pipeline completed in {}ms", summary.duration_ms);

        Ok(PipelineResult {
            data: df,
            statistics,
            extremes,
            correlation,
            summary,
        })
    }

    /// Write the cleaned CSV, then the charts.
    ///
    /// Only call this with the result of a successful run. Charts are drawn
    /// only once the CSV is on disk, so a failed CSV write leaves nothing
    /// behind. Chart failures are recorded as warnings in the result summary.
    pub fn export(&self, result: &mut PipelineResult) -> Result<ExportOutput> {
        let mut output = ExportOutput::default();
        if !self.config.save_to_disk {
            info!("save_to_disk disabled, nothing written");
            return Ok(output);
        }

        let chart_data = if self.config.generate_charts {
            Some(ChartData::from_dataset(&result.data)?)
        } else {
            None
        };

        self.report_progress(ProgressUpdate::new(
            PipelineStage::Export,
            0.0,
            "Writing cleaned dataset",
        ));
        output.dataset = Some(self.reporter.write_dataset(&result.data)?);

        if let Some(chart_data) = chart_data {
            self.report_progress(ProgressUpdate::new(
                PipelineStage::Export,
                0.5,
                "Rendering charts",
            ));
            let rendered = self.charts.render_all(&chart_data, result.data.height());
            for warning in rendered.warnings {
                result.summary.add_warning(warning);
            }
            output.charts = rendered.written;
            output.chart_data = Some(chart_data);
        }

        Ok(output)
    }

    pub fn report_generator(&self) -> &ReportGenerator {
        &self.reporter
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Ensure PipelineBuilder is Send (can be moved to another thread during construction)
static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, crate::config::ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let reporter = ReportGenerator::new(config.output_dir.clone(), config.output_name.clone());
        let charts = ChartRenderer::new(config.output_dir.clone());

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            reporter,
            charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> DataFrame {
        df![
            "Name" => ["a", "b", "c", "d", "e"],
            "Age" => [20.0, 31.0, -1.0, 45.0, 52.0],
            "Satisfaction Percentage" => [Some(50.0), Some(90.0), Some(10.0), Some(90.0), Some(30.0)],
            "Product_Reviews" => ["Good", "Good", "Bad", "Good", "Bad"],
        ]
        .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert_eq!(pipeline.config.rolling_window, 3);
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_pipeline_builder_with_config() {
        let config = PipelineConfig::builder()
            .rolling_window(5)
            .generate_charts(false)
            .build()
            .unwrap();

        let pipeline = Pipeline::builder().config(config).build().unwrap();

        assert_eq!(pipeline.config.rolling_window, 5);
        assert!(!pipeline.config.generate_charts);
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let config = PipelineConfig {
            rolling_window: 0,
            ..PipelineConfig::default()
        };
        assert!(Pipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_pipeline_builder_with_progress_callback() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let pipeline = Pipeline::builder()
            .on_progress(move |_update| {
                call_count_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        pipeline.report_progress(ProgressUpdate::new(PipelineStage::Filtering, 0.5, "Test"));

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_process_produces_analysis() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(sample()).unwrap();

        assert_eq!(result.data.height(), 4);
        let statistics = result.statistics.unwrap();
        assert_eq!(statistics.count, 4);
        assert_eq!(statistics.mean, 65.0);
        let extremes = result.extremes.unwrap();
        assert_eq!(extremes.most_positive.index, 1);
        assert_eq!(extremes.most_positive.name(), "b");
        assert_eq!(extremes.most_negative.name(), "e");
        assert!(!result.correlation.is_applicable());
    }

    #[test]
    fn test_process_reports_stages_then_complete() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        let pipeline = Pipeline::builder()
            .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
            .build()
            .unwrap();
        pipeline.process(sample()).unwrap();

        let stages = stages.lock().unwrap();
        assert_eq!(stages.first(), Some(&PipelineStage::Normalizing));
        assert!(stages.contains(&PipelineStage::Analysis));
        assert_eq!(stages.last(), Some(&PipelineStage::Complete));
    }

    #[test]
    fn test_process_failure_reports_failed() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        let pipeline = Pipeline::builder()
            .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
            .build()
            .unwrap();
        let df = sample().drop("Product_Reviews").unwrap();

        let err = pipeline.process(df).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
        assert_eq!(stages.lock().unwrap().last(), Some(&PipelineStage::Failed));
    }

    #[test]
    fn test_export_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::builder()
            .output_dir(dir.path())
            .save_to_disk(false)
            .build()
            .unwrap();
        let pipeline = Pipeline::builder().config(config).build().unwrap();

        let mut result = pipeline.process(sample()).unwrap();
        let output = pipeline.export(&mut result).unwrap();

        assert!(output.dataset.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_failed_csv_leaves_no_charts() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocked = dir.path().join("out");
        std::fs::write(&blocked, b"").unwrap();
        let config = PipelineConfig::builder()
            .output_dir(&blocked)
            .build()
            .unwrap();
        let pipeline = Pipeline::builder().config(config).build().unwrap();

        let mut result = pipeline.process(sample()).unwrap();
        let err = pipeline.export(&mut result).unwrap_err();

        assert_eq!(err.error_code(), "IO_ERROR");
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out")]);
        assert!(result.summary.warnings.is_empty());
    }

    #[test]
    fn test_export_writes_csv_without_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::builder()
            .output_dir(dir.path())
            .generate_charts(false)
            .build()
            .unwrap();
        let pipeline = Pipeline::builder().config(config).build().unwrap();

        let mut result = pipeline.process(sample()).unwrap();
        let output = pipeline.export(&mut result).unwrap();

        let path = output.dataset.unwrap();
        assert_eq!(path, dir.path().join("cleaned_transformed_data.csv"));
        assert!(path.is_file());
        assert!(output.charts.is_empty());
        assert!(output.chart_data.is_none());
    }
}
