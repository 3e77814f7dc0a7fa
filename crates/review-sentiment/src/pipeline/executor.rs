//! Cleaning executor module.
//!
//! Contains the execution logic for the in-place cleaning stages.

use crate::analysis::add_rolling_average;
use crate::cleaner::DataCleaner;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::imputers::impute_missing_values;
use crate::pipeline::progress::PipelineStage;
use crate::types::ProcessingSummary;
use polars::prelude::*;
use tracing::{debug, info};

/// Runs the cleaning stages on a DataFrame in their fixed order:
/// normalize, filter, clamp, impute, rolling average.
pub struct CleaningExecutor<'a> {
    config: &'a PipelineConfig,
    cleaner: DataCleaner,
}

impl<'a> CleaningExecutor<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            cleaner: DataCleaner::new(config.satisfaction_min, config.satisfaction_max),
        }
    }

    /// Execute every cleaning stage, recording what each did in `summary`.
    ///
    /// `on_stage` is called before each stage starts.
    pub fn execute(
        &self,
        df: &mut DataFrame,
        summary: &mut ProcessingSummary,
        on_stage: &dyn Fn(PipelineStage, &str),
    ) -> Result<()> {
        info!("Executing cleaning stages...");
        summary.rows_before = df.height();

        on_stage(PipelineStage::Normalizing, "Normalizing column names");
        summary.renamed_columns = self.cleaner.normalize_columns(df)?;

        on_stage(PipelineStage::Filtering, "Dropping records with missing or negative age");
        summary.rows_removed = self.cleaner.drop_invalid_ages(df)?;

        on_stage(PipelineStage::Clamping, "Clamping satisfaction into range");
        summary.values_clamped = self.cleaner.clamp_satisfaction(df)?;

        on_stage(PipelineStage::Imputation, "Imputing missing values");
        impute_missing_values(df, self.config, summary)?;

        on_stage(PipelineStage::RollingAverage, "Computing rolling sentiment average");
        add_rolling_average(df, self.config.rolling_window)?;
        summary.rolling_window = self.config.rolling_window;

        summary.rows_after = df.height();
        summary.columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let remaining_nulls: usize = df
            .get_columns()
            .iter()
            .map(|col| col.null_count())
            .sum();
        debug!("Missing values remaining (rolling average included): {}", remaining_nulls);

        info!(
            "Cleaning completed: {} -> {} rows, {} values imputed",
            summary.rows_before,
            summary.rows_after,
            summary.total_imputed()
        );
        Ok(())
    }
}
