//! Shared utilities for the review pipeline.
//!
//! This module contains the column access and fill helpers used across the
//! cleaning, imputation and analysis stages.

use crate::error::{Result, ReviewError};
use crate::types::{ReviewRecord, SATISFACTION_COLUMN};
use polars::prelude::*;

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Check whether the dataset has a column with this exact name.
pub fn has_column(df: &DataFrame, column: &str) -> bool {
    df.get_column_index(column).is_some()
}

/// Fetch a column, failing with a schema error naming the stage that needs it.
pub fn require_column<'a>(df: &'a DataFrame, column: &str, stage: &str) -> Result<&'a Column> {
    df.column(column)
        .map_err(|_| ReviewError::missing_column(column, stage))
}

/// Read a Series as `f64` values.
///
/// Cells that cannot be parsed as numbers, and NaN, come back as `None`.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Count missing cells: nulls, plus NaN in float columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    if series.dtype().is_float() {
        Ok(numeric_values(series)?.iter().filter(|v| v.is_none()).count())
    } else {
        Ok(series.null_count())
    }
}

/// Read a required column as `f64` values.
pub fn column_values(df: &DataFrame, column: &str, stage: &str) -> Result<Vec<Option<f64>>> {
    let col = require_column(df, column, stage)?;
    Ok(numeric_values(col.as_materialized_series())?)
}

/// Read `Satisfaction_Percentage` for a stage that runs after imputation.
///
/// Any value still missing at this point is skipped by the caller, so the
/// values are returned together with their row positions.
pub fn satisfaction_by_row(df: &DataFrame, stage: &str) -> Result<Vec<(usize, f64)>> {
    Ok(column_values(df, SATISFACTION_COLUMN, stage)?
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|value| (i, value)))
        .collect())
}

/// Render a cell as plain text (no quoting), empty for null.
pub fn any_value_to_string(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{}", other),
    }
}

/// Read one row of the dataset as a [`ReviewRecord`].
pub fn record_at(df: &DataFrame, index: usize, satisfaction: f64) -> Result<ReviewRecord> {
    let mut fields = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let value = col.get(index)?;
        fields.push((col.name().to_string(), any_value_to_string(&value)));
    }

    Ok(ReviewRecord {
        index,
        satisfaction,
        fields,
    })
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always `Float64`.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let filled: Vec<Option<f64>> = numeric_values(series)?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a Series with a text value.
///
/// Non-string columns are cast to `String` first, so existing values keep
/// their textual representation. NaN in a float column counts as missing.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let as_text = if series.dtype().is_float() {
        Series::new(series.name().clone(), numeric_values(series)?).cast(&DataType::String)?
    } else {
        series.cast(&DataType::String)?
    };
    let filled: StringChunked = as_text
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(filled.with_name(series.name().clone()).into_series())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_from_strings() {
        let series = Series::new("age".into(), &[Some("25"), Some("abc"), None, Some("-3")]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![Some(25.0), None, None, Some(-3.0)]);
    }

    #[test]
    fn test_numeric_values_treats_nan_as_missing() {
        let series = Series::new("score".into(), &[1.0, f64::NAN, 3.0]);
        let values = numeric_values(&series).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_require_column_reports_stage() {
        let df = df!["Name" => ["a"]].unwrap();
        let err = require_column(&df, "Age", "row filter").unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
        assert!(err.to_string().contains("row filter"));
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("test".into(), &[Some(1.0), None, Some(3.0)]);
        let filled = fill_numeric_nulls(&series, 0.0).unwrap();

        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 0.0);
        assert_eq!(filled.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_string_nulls_keeps_values_unquoted() {
        let series = Series::new("text".into(), &[Some("Hello"), None]);
        let filled = fill_string_nulls(&series, "Not Specified").unwrap();

        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("Hello"), Some("Not Specified")]);
    }

    #[test]
    fn test_fill_string_nulls_on_numeric_column() {
        let series = Series::new("score".into(), &[Some(1i64), None]);
        let filled = fill_string_nulls(&series, "Not Specified").unwrap();

        assert_eq!(filled.dtype(), &DataType::String);
        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("1"), Some("Not Specified")]);
    }

    #[test]
    fn test_missing_count_includes_nan() {
        let floats = Series::new("score".into(), &[Some(1.0), Some(f64::NAN), None]);
        assert_eq!(missing_count(&floats).unwrap(), 2);

        let text = Series::new("name".into(), &[Some("NaN"), None]);
        assert_eq!(missing_count(&text).unwrap(), 1);
    }

    #[test]
    fn test_fill_string_nulls_replaces_nan() {
        let series = Series::new("score".into(), &[Some(2.5), Some(f64::NAN), None]);
        let filled = fill_string_nulls(&series, "Not Specified").unwrap();

        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(
            values,
            vec![Some("2.5"), Some("Not Specified"), Some("Not Specified")]
        );
    }

    #[test]
    fn test_record_at() {
        let df = df![
            "Name" => ["Alice", "Bob"],
            "Satisfaction_Percentage" => [80.0, 20.0],
        ]
        .unwrap();

        let record = record_at(&df, 1, 20.0).unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(record.name(), "Bob");
        assert!(record.get("Satisfaction_Percentage").unwrap().starts_with("20"));
    }
}
