//! Data cleaning module for the review dataset.
//!
//! This module provides functionality for:
//! - Normalizing column names
//! - Dropping rows with a missing or negative age
//! - Clamping satisfaction scores into their valid range

mod normalizer;
mod filters;

pub use filters::{clamp_column, drop_invalid_ages};
pub use normalizer::{normalize_column_name, normalize_column_names};

use crate::error::Result;
use crate::types::SATISFACTION_COLUMN;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner applying the row and column cleaning stages in place.
pub struct DataCleaner {
    satisfaction_min: f64,
    satisfaction_max: f64,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl DataCleaner {
    pub fn new(satisfaction_min: f64, satisfaction_max: f64) -> Self {
        Self {
            satisfaction_min,
            satisfaction_max,
        }
    }

    /// Trim column names and replace spaces with underscores.
    ///
    /// Returns the `(old, new)` pairs of renamed columns.
    pub fn normalize_columns(&self, df: &mut DataFrame) -> Result<Vec<(String, String)>> {
        let renamed = normalize_column_names(df)?;
        if renamed.is_empty() {
            debug!("Column names already normalized");
        } else {
            info!("Normalized {} column names", renamed.len());
            for (old, new) in &renamed {
                debug!("  '{}' -> '{}'", old, new);
            }
        }
        Ok(renamed)
    }

    /// Remove every record whose `Age` is missing or negative.
    ///
    /// Returns the number of records removed.
    pub fn drop_invalid_ages(&self, df: &mut DataFrame) -> Result<usize> {
        let before = df.height();
        let removed = drop_invalid_ages(df)?;
        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            info!(
                "Removed {} rows with missing or negative age ({:.1}%)",
                removed, pct
            );
        } else {
            debug!("No rows with missing or negative age found");
        }
        Ok(removed)
    }

    /// Clamp `Satisfaction_Percentage` into the configured range.
    ///
    /// Returns the number of values that were moved onto a bound.
    pub fn clamp_satisfaction(&self, df: &mut DataFrame) -> Result<usize> {
        let clamped = clamp_column(
            df,
            SATISFACTION_COLUMN,
            self.satisfaction_min,
            self.satisfaction_max,
        )?;
        debug!(
            "Clamped {} values of '{}' into [{}, {}]",
            clamped, SATISFACTION_COLUMN, self.satisfaction_min, self.satisfaction_max
        );
        Ok(clamped)
    }
}
