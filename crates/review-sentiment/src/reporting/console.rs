//! Plain-text console report.

use crate::types::{BrandCorrelation, PipelineResult, ReviewRecord, SentimentStatistics};
use std::fmt::Write;

/// Printed when no brand correlation exists.
pub const NO_CORRELATION_MESSAGE: &str = "Correlation could not be calculated.";

/// Statistics as a `name: value` mapping.
pub fn format_statistics(stats: &SentimentStatistics) -> String {
    let std = stats
        .standard_deviation
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "undefined".to_string());

    format!(
        "Statistics: {{Mean: {:.2}, Median: {:.2}, Standard_Deviation: {}}}",
        stats.mean, stats.median, std
    )
}

/// Every field of a record, one per line, names aligned.
pub fn format_record(title: &str, record: &ReviewRecord) -> String {
    let width = record
        .fields
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} (record {}):\n", title, record.index);
    for (name, value) in &record.fields {
        let _ = writeln!(out, "  {:<width$}  {}", name, value, width = width);
    }
    out
}

pub fn format_correlation(correlation: &BrandCorrelation) -> String {
    let mut out = String::from("Correlation of Sentiments: ");
    match correlation {
        BrandCorrelation::NotApplicable { .. } => out.push_str(NO_CORRELATION_MESSAGE),
        BrandCorrelation::Scalar {
            brands: (a, b),
            coefficient,
            ..
        } => match coefficient {
            Some(r) => {
                let _ = write!(out, "{} vs {}: {:.4}", a, b, r);
            }
            None => out.push_str(NO_CORRELATION_MESSAGE),
        },
        BrandCorrelation::Matrix {
            brands,
            coefficients,
            ..
        } => {
            let width = brands.iter().map(String::len).max().unwrap_or(0).max(7);
            let _ = write!(out, "\n  {:<width$}", "", width = width);
            for brand in brands {
                let _ = write!(out, "  {:>width$}", brand, width = width);
            }
            for (brand, row) in brands.iter().zip(coefficients) {
                let _ = write!(out, "\n  {:<width$}", brand, width = width);
                for value in row {
                    let cell = value
                        .map(|r| format!("{:.4}", r))
                        .unwrap_or_else(|| "-".to_string());
                    let _ = write!(out, "  {:>width$}", cell, width = width);
                }
            }
        }
    }
    out
}

/// The three-line findings summary.
pub fn narrative_summary(result: &PipelineResult) -> String {
    let mean = result
        .statistics
        .map(|stats| format!("{:.2}", stats.mean))
        .unwrap_or_else(|| "undefined".to_string());

    let (positive, negative) = match &result.extremes {
        Some(extremes) => (
            describe_review(&extremes.most_positive),
            describe_review(&extremes.most_negative),
        ),
        None => (NO_SCORED_REVIEW.to_string(), NO_SCORED_REVIEW.to_string()),
    };

    format!(
        "The analysis highlights the following:\n\
         1. The mean satisfaction percentage is {}.\n\
         2. The most positive review {}.\n\
         3. The most negative review {}.",
        mean, positive, negative,
    )
}

const NO_SCORED_REVIEW: &str = "is undefined, no review has a satisfaction score";

fn describe_review(record: &ReviewRecord) -> String {
    format!(
        "came from {} with a sentiment score of {:.2}",
        record.name(),
        record.satisfaction
    )
}

/// Full console report: statistics, extreme records, correlation and summary.
pub fn render_console_report(result: &PipelineResult) -> String {
    let statistics = match &result.statistics {
        Some(stats) => format_statistics(stats),
        None => "Statistics: undefined (no satisfaction values)".to_string(),
    };
    let records = match &result.extremes {
        Some(extremes) => [
            format_record("Most Positive Review", &extremes.most_positive),
            format_record("Most Negative Review", &extremes.most_negative),
        ],
        None => [
            "Most Positive Review: undefined\n".to_string(),
            "Most Negative Review: undefined\n".to_string(),
        ],
    };
    let [positive, negative] = records;

    [
        statistics,
        positive,
        negative,
        format_correlation(&result.correlation),
        String::new(),
        narrative_summary(result),
    ]
    .join("\n")
}
