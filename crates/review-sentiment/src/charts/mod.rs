//! Chart generation for the cleaned dataset.
//!
//! Three PNG charts are produced:
//! - a line chart of the rolling sentiment average against the record index
//! - a bar chart of the mean satisfaction per brand
//! - a pie chart of the review category proportions

mod data;
mod render;

pub use data::{CategoryShare, ChartData};

use crate::error::{Result, ReviewError};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// File name of the rolling average line chart.
pub const TREND_CHART_FILE: &str = "sentiment_trend.png";
/// File name of the per-brand bar chart.
pub const BRAND_CHART_FILE: &str = "brand_sentiment.png";
/// File name of the review category pie chart.
pub const DISTRIBUTION_CHART_FILE: &str = "review_distribution.png";

/// Outcome of rendering every chart.
#[derive(Debug, Default)]
pub struct ChartOutput {
    /// Charts written to disk.
    pub written: Vec<PathBuf>,
    /// Charts that were skipped or failed, with the reason.
    pub warnings: Vec<String>,
}

/// Renders the chart set into an output directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render all three charts.
    ///
    /// A failing chart does not stop the others; failures are collected as
    /// warnings in the returned [`ChartOutput`].
    pub fn render_all(&self, data: &ChartData, record_count: usize) -> ChartOutput {
        let mut output = ChartOutput::default();

        let trend = self.render_trend(data, record_count);
        Self::collect(&mut output, trend);

        match &data.brand_averages {
            Some(averages) => {
                let brands = self.render_brands(averages);
                Self::collect(&mut output, brands);
            }
            None => {
                let message = "No 'Brand' column, brand chart skipped".to_string();
                warn!("{}", message);
                output.warnings.push(message);
            }
        }

        let distribution = self.render_distribution(data);
        Self::collect(&mut output, distribution);

        info!("Rendered {} charts", output.written.len());
        output
    }

    pub fn render_trend(&self, data: &ChartData, record_count: usize) -> Result<PathBuf> {
        let path = self.output_dir.join(TREND_CHART_FILE);
        render::draw_sentiment_trend(data, record_count, &path)
            .map_err(|e| chart_error(TREND_CHART_FILE, e))?;
        Ok(path)
    }

    pub fn render_brands(&self, averages: &[(String, f64)]) -> Result<PathBuf> {
        let path = self.output_dir.join(BRAND_CHART_FILE);
        render::draw_brand_sentiment(averages, &path)
            .map_err(|e| chart_error(BRAND_CHART_FILE, e))?;
        Ok(path)
    }

    pub fn render_distribution(&self, data: &ChartData) -> Result<PathBuf> {
        let path = self.output_dir.join(DISTRIBUTION_CHART_FILE);
        render::draw_review_distribution(&data.review_distribution, &path)
            .map_err(|e| chart_error(DISTRIBUTION_CHART_FILE, e))?;
        Ok(path)
    }

    fn collect(output: &mut ChartOutput, result: Result<PathBuf>) {
        match result {
            Ok(path) => {
                debug!("Chart written: {}", path.display());
                output.written.push(path);
            }
            Err(e) => {
                warn!("{}", e);
                output.warnings.push(e.to_string());
            }
        }
    }
}

fn chart_error(chart: &str, e: Box<dyn std::error::Error>) -> ReviewError {
    ReviewError::Chart {
        chart: chart.to_string(),
        reason: e.to_string(),
    }
}
