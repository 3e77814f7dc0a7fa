//! Descriptive statistics of satisfaction.

use crate::error::{Result, ReviewError};
use crate::types::SentimentStatistics;
use crate::utils::satisfaction_by_row;
use polars::prelude::*;

/// Mean, median and sample standard deviation of `Satisfaction_Percentage`.
///
/// Missing values are skipped. Fails with [`ReviewError::EmptyDataset`]
/// when the dataset has no records; returns `None` when records exist but
/// none has a satisfaction value.
pub fn sentiment_statistics(df: &DataFrame) -> Result<Option<SentimentStatistics>> {
    if df.height() == 0 {
        return Err(ReviewError::EmptyDataset(
            "statistics require at least one record".to_string(),
        ));
    }

    let values: Vec<f64> = satisfaction_by_row(df, "statistics")?
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    if values.is_empty() {
        return Ok(None);
    }
    describe(&values).map(Some)
}

/// Statistics of a slice of values.
pub fn describe(values: &[f64]) -> Result<SentimentStatistics> {
    if values.is_empty() {
        return Err(ReviewError::EmptyDataset(
            "no values to summarize".to_string(),
        ));
    }

    Ok(SentimentStatistics {
        mean: calculate_mean(values),
        median: calculate_median(values),
        standard_deviation: calculate_std(values),
        count: values.len(),
    })
}

fn calculate_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value, or the mean of the two middle values for an even count.
fn calculate_median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1 denominator); undefined below two values.
fn calculate_std(values: &[f64]) -> Option<f64> {
    let n = values.len() as f64;
    if values.len() <= 1 {
        return None;
    }

    let mean = calculate_mean(values);
    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== describe tests ====================

    #[test]
    fn test_describe_basic() {
        let stats = describe(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.standard_deviation, Some(10.0));
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_describe_even_count_median() {
        let stats = describe(&[40.0, 10.0, 30.0, 20.0]).unwrap();
        assert_eq!(stats.median, 25.0);
    }

    #[test]
    fn test_describe_single_value() {
        let stats = describe(&[42.0]).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.standard_deviation, None);
    }

    #[test]
    fn test_describe_identical_values() {
        let stats = describe(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.standard_deviation, Some(0.0));
    }

    #[test]
    fn test_describe_empty() {
        let err = describe(&[]).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    // ==================== sentiment_statistics tests ====================

    #[test]
    fn test_sentiment_statistics_from_dataframe() {
        let mut df = df![
            "Satisfaction_Percentage" => [10.0, 20.0, 30.0],
        ]
        .unwrap();

        let stats = sentiment_statistics(&df).unwrap().unwrap();
        assert_eq!(stats.mean, 20.0);

        df = df.head(Some(0));
        let err = sentiment_statistics(&df).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_sentiment_statistics_undefined_without_values() {
        let df = df![
            "Name" => ["a", "b"],
            "Satisfaction_Percentage" => [Option::<f64>::None, None],
        ]
        .unwrap();

        assert_eq!(sentiment_statistics(&df).unwrap(), None);
    }

    #[test]
    fn test_sentiment_statistics_missing_column() {
        let df = df!["Age" => [1.0]].unwrap();
        let err = sentiment_statistics(&df).unwrap_err();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }
}
