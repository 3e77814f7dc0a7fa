//! Configuration types for the review sentiment pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default trailing window for the rolling sentiment average.
pub const DEFAULT_ROLLING_WINDOW: usize = 3;

/// Default placeholder for missing review categories.
pub const DEFAULT_REVIEW_PLACEHOLDER: &str = "Unknown";

/// Default placeholder for any other missing cell.
pub const DEFAULT_MISSING_PLACEHOLDER: &str = "Not Specified";

/// Default output file name (without extension).
pub const DEFAULT_OUTPUT_NAME: &str = "cleaned_transformed_data";

/// What to do when every satisfaction value is missing and no mean exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MeanFallback {
    /// Leave the cells missing and record a warning
    #[default]
    LeaveMissing,
    /// Fill the cells with 0.0 and record a warning
    Zero,
}

/// Configuration for the review pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use review_sentiment::config::{PipelineConfig, MeanFallback};
///
/// let config = PipelineConfig::builder()
///     .rolling_window(5)
///     .mean_fallback(MeanFallback::Zero)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of records in the trailing rolling-average window.
    /// Default: 3
    pub rolling_window: usize,

    /// Lower bound for `Satisfaction_Percentage` clamping.
    /// Default: 0.0
    pub satisfaction_min: f64,

    /// Upper bound for `Satisfaction_Percentage` clamping.
    /// Default: 100.0
    pub satisfaction_max: f64,

    /// Value assigned to missing `Product_Reviews` cells.
    /// Default: "Unknown"
    pub review_placeholder: String,

    /// Value assigned to any other missing cell.
    /// Default: "Not Specified"
    pub missing_placeholder: String,

    /// Behavior when the satisfaction mean is undefined (all values missing).
    /// Default: LeaveMissing
    pub mean_fallback: MeanFallback,

    /// Output directory for the cleaned CSV, charts and reports.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Output file name for the cleaned CSV (without extension).
    /// Default: "cleaned_transformed_data"
    pub output_name: String,

    /// Whether to render the PNG charts.
    /// Default: true
    pub generate_charts: bool,

    /// Whether to write the cleaned dataset and charts to disk.
    /// When false, results are kept in memory only.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
            satisfaction_min: 0.0,
            satisfaction_max: 100.0,
            review_placeholder: DEFAULT_REVIEW_PLACEHOLDER.to_string(),
            missing_placeholder: DEFAULT_MISSING_PLACEHOLDER.to_string(),
            mean_fallback: MeanFallback::default(),
            output_dir: PathBuf::from("."),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            generate_charts: true,
            save_to_disk: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Path of the cleaned CSV inside the output directory.
    pub fn output_csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_name))
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.rolling_window == 0 {
            return Err(ConfigValidationError::InvalidWindow(self.rolling_window));
        }

        if !self.satisfaction_min.is_finite()
            || !self.satisfaction_max.is_finite()
            || self.satisfaction_min > self.satisfaction_max
        {
            return Err(ConfigValidationError::InvalidBounds {
                min: self.satisfaction_min,
                max: self.satisfaction_max,
            });
        }

        if self.output_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputName);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid rolling window: {0} (must be a positive integer)")]
    InvalidWindow(usize),

    #[error("Invalid satisfaction bounds: [{min}, {max}] (min must not exceed max)")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Output name must not be empty")]
    EmptyOutputName,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    rolling_window: Option<usize>,
    satisfaction_min: Option<f64>,
    satisfaction_max: Option<f64>,
    review_placeholder: Option<String>,
    missing_placeholder: Option<String>,
    mean_fallback: Option<MeanFallback>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
    generate_charts: Option<bool>,
    save_to_disk: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the rolling-average window (must be at least 1).
    pub fn rolling_window(mut self, window: usize) -> Self {
        self.rolling_window = Some(window);
        self
    }

    /// Set the clamping bounds for `Satisfaction_Percentage`.
    ///
    /// # Arguments
    /// * `min` - Lower bound (inclusive)
    /// * `max` - Upper bound (inclusive)
    pub fn satisfaction_bounds(mut self, min: f64, max: f64) -> Self {
        self.satisfaction_min = Some(min);
        self.satisfaction_max = Some(max);
        self
    }

    /// Set the placeholder for missing review categories.
    pub fn review_placeholder(mut self, value: impl Into<String>) -> Self {
        self.review_placeholder = Some(value.into());
        self
    }

    /// Set the placeholder for all other missing cells.
    pub fn missing_placeholder(mut self, value: impl Into<String>) -> Self {
        self.missing_placeholder = Some(value.into());
        self
    }

    /// Set the fallback used when the satisfaction mean is undefined.
    pub fn mean_fallback(mut self, fallback: MeanFallback) -> Self {
        self.mean_fallback = Some(fallback);
        self
    }

    /// Set the output directory for the cleaned data and charts.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom output file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn generate_charts(mut self, generate: bool) -> Self {
        self.generate_charts = Some(generate);
        self
    }

    /// Enable or disable writing results to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            rolling_window: self.rolling_window.unwrap_or(DEFAULT_ROLLING_WINDOW),
            satisfaction_min: self.satisfaction_min.unwrap_or(0.0),
            satisfaction_max: self.satisfaction_max.unwrap_or(100.0),
            review_placeholder: self
                .review_placeholder
                .unwrap_or_else(|| DEFAULT_REVIEW_PLACEHOLDER.to_string()),
            missing_placeholder: self
                .missing_placeholder
                .unwrap_or_else(|| DEFAULT_MISSING_PLACEHOLDER.to_string()),
            mean_fallback: self.mean_fallback.unwrap_or_default(),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            output_name: self
                .output_name
                .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()),
            generate_charts: self.generate_charts.unwrap_or(true),
            save_to_disk: self.save_to_disk.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.rolling_window, 3);
        assert_eq!(config.satisfaction_min, 0.0);
        assert_eq!(config.satisfaction_max, 100.0);
        assert_eq!(config.review_placeholder, "Unknown");
        assert_eq!(config.missing_placeholder, "Not Specified");
        assert_eq!(config.mean_fallback, MeanFallback::LeaveMissing);
        assert!(config.generate_charts);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config.rolling_window, PipelineConfig::default().rolling_window);
        assert_eq!(config.output_name, "cleaned_transformed_data");
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .rolling_window(7)
            .satisfaction_bounds(10.0, 90.0)
            .mean_fallback(MeanFallback::Zero)
            .output_dir("results")
            .output_name("reviews_clean")
            .generate_charts(false)
            .build()
            .unwrap();

        assert_eq!(config.rolling_window, 7);
        assert_eq!(config.satisfaction_min, 10.0);
        assert_eq!(config.satisfaction_max, 90.0);
        assert_eq!(config.mean_fallback, MeanFallback::Zero);
        assert!(!config.generate_charts);
        assert_eq!(
            config.output_csv_path(),
            PathBuf::from("results").join("reviews_clean.csv")
        );
    }

    #[test]
    fn test_validation_zero_window() {
        let result = PipelineConfig::builder().rolling_window(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidWindow(0)
        ));
    }

    #[test]
    fn test_validation_inverted_bounds() {
        let result = PipelineConfig::builder()
            .satisfaction_bounds(100.0, 0.0)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBounds { .. }
        ));
    }

    #[test]
    fn test_validation_empty_output_name() {
        let result = PipelineConfig::builder().output_name("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyOutputName
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "rolling_window": 4,
            "satisfaction_min": 0.0,
            "satisfaction_max": 100.0,
            "review_placeholder": "Unknown",
            "missing_placeholder": "Not Specified",
            "mean_fallback": "Zero",
            "output_dir": "out",
            "output_name": "clean",
            "generate_charts": false,
            "save_to_disk": false
        }"#;

        let config: PipelineConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.rolling_window, 4);
        assert_eq!(config.mean_fallback, MeanFallback::Zero);
        assert_eq!(config.output_dir.to_str().unwrap(), "out");
        assert!(!config.save_to_disk);
        assert!(config.validate().is_ok());
    }
}
