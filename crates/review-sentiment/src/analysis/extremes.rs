//! Most positive and most negative review.

use crate::error::{Result, ReviewError};
use crate::types::ExtremeRecords;
use crate::utils::{record_at, satisfaction_by_row};
use polars::prelude::*;

/// Find the records with the highest and lowest satisfaction.
///
/// Ties resolve to the earliest record. Fails with
/// [`ReviewError::EmptyDataset`] when the dataset has no records; returns
/// `None` when no record has a satisfaction value.
pub fn find_extremes(df: &DataFrame) -> Result<Option<ExtremeRecords>> {
    if df.height() == 0 {
        return Err(ReviewError::EmptyDataset(
            "extremes require at least one record".to_string(),
        ));
    }

    let values = satisfaction_by_row(df, "extremes")?;
    let Some((max_idx, min_idx)) = extreme_positions(&values) else {
        return Ok(None);
    };

    let (max_row, max_value) = values[max_idx];
    let (min_row, min_value) = values[min_idx];

    Ok(Some(ExtremeRecords {
        most_positive: record_at(df, max_row, max_value)?,
        most_negative: record_at(df, min_row, min_value)?,
    }))
}

/// Positions in `values` of the first maximum and first minimum.
fn extreme_positions(values: &[(usize, f64)]) -> Option<(usize, usize)> {
    let (first, rest) = values.split_first()?;
    let mut max = (0, first.1);
    let mut min = (0, first.1);

    for (offset, (_, value)) in rest.iter().enumerate() {
        if *value > max.1 {
            max = (offset + 1, *value);
        }
        if *value < min.1 {
            min = (offset + 1, *value);
        }
    }

    Some((max.0, min.0))
}
