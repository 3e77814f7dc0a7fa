//! Statistical imputation methods.
//!
//! Provides mean imputation for numeric columns and constant (placeholder)
//! imputation for everything else.

use crate::config::MeanFallback;
use crate::error::Result;
use crate::types::ProcessingSummary;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, missing_count, numeric_values, require_column};
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing cells of a numeric column with the mean of its present values.
    ///
    /// The mean excludes missing cells. When every cell is missing the mean
    /// is undefined and `fallback` decides: leave the cells missing, or fill
    /// them with 0.0. Both cases record a warning in the summary.
    pub fn apply_numeric_mean(
        df: &mut DataFrame,
        col_name: &str,
        fallback: MeanFallback,
        summary: &mut ProcessingSummary,
    ) -> Result<()> {
        let column = require_column(df, col_name, "imputation")?;
        let values = numeric_values(column.as_materialized_series())?;

        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing == 0 {
            debug!("No missing values in '{}'", col_name);
            return Ok(());
        }

        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let fill_value = if present.is_empty() {
            match fallback {
                MeanFallback::LeaveMissing => {
                    let message = format!(
                        "Every value of '{}' is missing; mean is undefined, values left missing",
                        col_name
                    );
                    warn!("{}", message);
                    summary.add_warning(message);
                    return Ok(());
                }
                MeanFallback::Zero => {
                    let message = format!(
                        "Every value of '{}' is missing; mean is undefined, filled with 0",
                        col_name
                    );
                    warn!("{}", message);
                    summary.add_warning(message);
                    0.0
                }
            }
        } else {
            present.iter().sum::<f64>() / present.len() as f64
        };

        let filled = fill_numeric_nulls(column.as_materialized_series(), fill_value)?;
        df.replace(col_name, filled)?;

        debug!("Filled '{}' with mean: {:.2}", col_name, fill_value);
        summary.add_imputation(col_name, missing, format!("{:.2}", fill_value));
        Ok(())
    }

    /// Fill missing cells of a required column with a constant text value.
    pub fn apply_constant_imputation(
        df: &mut DataFrame,
        col_name: &str,
        value: &str,
        summary: &mut ProcessingSummary,
    ) -> Result<()> {
        let column = require_column(df, col_name, "imputation")?;
        let missing = missing_count(column.as_materialized_series())?;
        if missing == 0 {
            return Ok(());
        }

        let filled = fill_string_nulls(column.as_materialized_series(), value)?;
        df.replace(col_name, filled)?;

        debug!("Filled '{}' with constant value: '{}'", col_name, value);
        summary.add_imputation(col_name, missing, value);
        Ok(())
    }

    /// Fill every remaining missing cell with a text placeholder.
    ///
    /// Columns listed in `skip` are left alone. A numeric column that
    /// receives the placeholder becomes a text column.
    pub fn fill_remaining(
        df: &mut DataFrame,
        value: &str,
        skip: &[&str],
        summary: &mut ProcessingSummary,
    ) -> Result<()> {
        let mut columns_with_missing = Vec::new();
        for col in df.get_columns() {
            let name = col.name().as_str();
            if skip.contains(&name) {
                continue;
            }
            if missing_count(col.as_materialized_series())? > 0 {
                columns_with_missing.push(name.to_string());
            }
        }

        for col_name in &columns_with_missing {
            Self::apply_constant_imputation(df, col_name, value, summary)?;
        }

        Ok(())
    }
}
