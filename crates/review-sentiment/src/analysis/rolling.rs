//! Trailing rolling average of satisfaction.

use crate::error::{Result, ReviewError};
use crate::types::{ROLLING_AVERAGE_COLUMN, SATISFACTION_COLUMN};
use crate::utils::column_values;
use polars::prelude::*;
use tracing::debug;

/// Trailing mean over the current value and the `window - 1` before it.
///
/// Positions before the first full window are `None`, as is any window
/// containing a missing value. A window of 0 is rejected.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(ReviewError::InvalidConfig(
            "rolling window must be a positive integer".to_string(),
        ));
    }

    let averages = (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let sum = slice.iter().copied().try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
            Some(sum / window as f64)
        })
        .collect();

    Ok(averages)
}

/// Append `Sentiment_Rolling_Average` computed over `Satisfaction_Percentage`.
///
/// An existing column of that name is replaced.
pub fn add_rolling_average(df: &mut DataFrame, window: usize) -> Result<()> {
    let values = column_values(df, SATISFACTION_COLUMN, "rolling average")?;
    let averages = rolling_mean(&values, window)?;

    let defined = averages.iter().filter(|v| v.is_some()).count();
    debug!(
        "Rolling average (window {}): {} of {} positions defined",
        window,
        defined,
        averages.len()
    );

    df.with_column(Series::new(ROLLING_AVERAGE_COLUMN.into(), averages))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric_values;

    fn approx(actual: &[Option<f64>], expected: &[Option<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            match (a, e) {
                (Some(a), Some(e)) => assert!((a - e).abs() < 0.01, "{} != {}", a, e),
                (None, None) => {}
                _ => panic!("{:?} != {:?}", actual, expected),
            }
        }
    }

    #[test]
    fn test_rolling_mean_window_three() {
        let values = [Some(100.0), Some(0.0), Some(50.0), Some(50.0)];
        let averages = rolling_mean(&values, 3).unwrap();
        approx(&averages, &[None, None, Some(50.0), Some(33.33)]);
    }

    #[test]
    fn test_rolling_mean_window_one_is_identity() {
        let values = [Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(rolling_mean(&values, 1).unwrap(), values.to_vec());
    }

    #[test]
    fn test_rolling_mean_shorter_than_window() {
        let values = [Some(1.0), Some(2.0)];
        assert_eq!(rolling_mean(&values, 3).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_rolling_mean_missing_value_poisons_window() {
        let values = [Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)];
        let averages = rolling_mean(&values, 2).unwrap();
        assert_eq!(averages, vec![None, None, None, Some(3.5), Some(4.5)]);
    }

    #[test]
    fn test_rolling_mean_zero_window_rejected() {
        let err = rolling_mean(&[Some(1.0)], 0).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_rolling_mean_never_looks_ahead() {
        let base = [Some(10.0), Some(20.0), Some(30.0)];
        let extended = [Some(10.0), Some(20.0), Some(30.0), Some(1000.0)];
        let a = rolling_mean(&base, 2).unwrap();
        let b = rolling_mean(&extended, 2).unwrap();
        assert_eq!(a[..], b[..3]);
    }

    #[test]
    fn test_add_rolling_average_column() {
        let mut df = df![
            "Satisfaction_Percentage" => [10.0, 20.0, 30.0, 40.0],
        ]
        .unwrap();

        add_rolling_average(&mut df, 3).unwrap();

        let column = df.column(ROLLING_AVERAGE_COLUMN).unwrap();
        let values = numeric_values(column.as_materialized_series()).unwrap();
        assert_eq!(values, vec![None, None, Some(20.0), Some(30.0)]);
    }

    #[test]
    fn test_add_rolling_average_requires_satisfaction() {
        let mut df = df!["Age" => [1.0]].unwrap();
        let err = add_rolling_average(&mut df, 3).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }
}
