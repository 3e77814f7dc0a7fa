//! Row filtering and range clamping.

use crate::error::Result;
use crate::types::AGE_COLUMN;
use crate::utils::column_values;
use polars::prelude::*;

/// Drop every row whose `Age` is missing, unparseable or negative.
///
/// Row order is preserved and kept rows are not modified. Returns the
/// number of rows removed.
pub fn drop_invalid_ages(df: &mut DataFrame) -> Result<usize> {
    let ages = column_values(df, AGE_COLUMN, "row filter")?;
    let keep: Vec<bool> = ages
        .iter()
        .map(|age| matches!(age, Some(value) if *value >= 0.0))
        .collect();

    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        *df = df.filter(&mask)?;
    }

    Ok(removed)
}

/// Clamp a numeric column into `[min, max]`, leaving missing cells missing.
///
/// The column is rewritten as `Float64`. Returns the number of values that
/// were outside the range.
pub fn clamp_column(df: &mut DataFrame, column: &str, min: f64, max: f64) -> Result<usize> {
    let values = column_values(df, column, "range clamp")?;

    let mut clamped = 0;
    let bounded: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| {
            v.map(|value| {
                let bounded = value.clamp(min, max);
                if bounded != value {
                    clamped += 1;
                }
                bounded
            })
        })
        .collect();

    df.replace(column, Series::new(column.into(), bounded))?;
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SATISFACTION_COLUMN;
    use crate::utils::numeric_values;

    #[test]
    fn test_drop_invalid_ages_removes_negative_and_missing() {
        let mut df = df![
            "Name" => ["a", "b", "c", "d", "e"],
            "Age" => [Some(20.0), Some(35.0), Some(-1.0), None, Some(0.0)],
        ]
        .unwrap();

        let removed = drop_invalid_ages(&mut df).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(df.height(), 3);
        let kept: Vec<Option<&str>> = df.column("Name").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(kept, vec![Some("a"), Some("b"), Some("e")]);
    }

    #[test]
    fn test_drop_invalid_ages_keeps_rows_untouched() {
        let mut df = df![
            "Age" => [30i64, 40],
            "Satisfaction_Percentage" => [Some(150.0), None],
        ]
        .unwrap();

        let removed = drop_invalid_ages(&mut df).unwrap();

        assert_eq!(removed, 0);
        let sat = numeric_values(df.column("Satisfaction_Percentage").unwrap().as_materialized_series()).unwrap();
        assert_eq!(sat, vec![Some(150.0), None]);
    }

    #[test]
    fn test_drop_invalid_ages_unparseable_text() {
        let mut df = df![
            "Age" => ["25", "unknown", "-4"],
        ]
        .unwrap();

        assert_eq!(drop_invalid_ages(&mut df).unwrap(), 2);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_drop_invalid_ages_requires_column() {
        let mut df = df!["Name" => ["a"]].unwrap();
        let err = drop_invalid_ages(&mut df).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }

    #[test]
    fn test_clamp_column() {
        let mut df = df![
            "Satisfaction_Percentage" => [Some(120.0), Some(-5.0), Some(50.0), None],
        ]
        .unwrap();

        let clamped = clamp_column(&mut df, SATISFACTION_COLUMN, 0.0, 100.0).unwrap();

        assert_eq!(clamped, 2);
        let values = numeric_values(df.column(SATISFACTION_COLUMN).unwrap().as_materialized_series()).unwrap();
        assert_eq!(values, vec![Some(100.0), Some(0.0), Some(50.0), None]);
    }

    #[test]
    fn test_clamp_integer_column_becomes_float() {
        let mut df = df!["Satisfaction_Percentage" => [10i64, 200]].unwrap();

        clamp_column(&mut df, SATISFACTION_COLUMN, 0.0, 100.0).unwrap();

        assert_eq!(df.column(SATISFACTION_COLUMN).unwrap().dtype(), &DataType::Float64);
    }
}
