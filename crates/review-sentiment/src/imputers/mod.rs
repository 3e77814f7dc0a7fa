//! Imputation module for handling missing values.
//!
//! Missing values are filled in a fixed order:
//! - `Satisfaction_Percentage` gets the mean of its present values
//! - `Product_Reviews` gets the review placeholder
//! - every other missing cell gets the generic placeholder

mod statistical;

pub use statistical::StatisticalImputer;

use crate::config::{MeanFallback, PipelineConfig};
use crate::error::Result;
use crate::types::{ProcessingSummary, REVIEWS_COLUMN, SATISFACTION_COLUMN};
use polars::prelude::*;
use tracing::info;

/// Run the three imputation steps in order.
///
/// When the satisfaction mean is undefined and the fallback leaves the
/// column missing, the generic placeholder skips that column so it stays
/// numeric.
pub fn impute_missing_values(
    df: &mut DataFrame,
    config: &PipelineConfig,
    summary: &mut ProcessingSummary,
) -> Result<()> {
    let before = summary.total_imputed();

    StatisticalImputer::apply_numeric_mean(df, SATISFACTION_COLUMN, config.mean_fallback, summary)?;
    StatisticalImputer::apply_constant_imputation(
        df,
        REVIEWS_COLUMN,
        &config.review_placeholder,
        summary,
    )?;

    let skip: &[&str] = match config.mean_fallback {
        MeanFallback::LeaveMissing => &[SATISFACTION_COLUMN],
        MeanFallback::Zero => &[],
    };
    StatisticalImputer::fill_remaining(df, &config.missing_placeholder, skip, summary)?;

    info!(
        "Imputed {} missing values",
        summary.total_imputed() - before
    );
    Ok(())
}
