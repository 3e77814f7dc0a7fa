//! Custom error types for the review sentiment pipeline.
//!
//! This module provides the error hierarchy using `thiserror` so every stage
//! (loading, cleaning, analysis, export) reports failures through one type.
//!
//! Errors are serializable so they can be emitted as part of JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the review pipeline.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Input file does not exist or is not a readable tabular file.
    #[error("File not found: {0}. Please check the file path.")]
    NotFound(String),

    /// A column required by a stage is missing from the dataset.
    #[error("Column '{column}' not found in dataset (required by {stage})")]
    ColumnNotFound { column: String, stage: String },

    /// A stage that needs at least one record received none.
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input file extension is not a supported tabular format.
    #[error("Unsupported input format '{0}' (expected a spreadsheet or delimited text file)")]
    UnsupportedFormat(String),

    /// Spreadsheet could not be opened or decoded.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// Chart rendering failed.
    #[error("Failed to render chart '{chart}': {reason}")]
    Chart { chart: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReviewError>,
    },
}

impl ReviewError {
    /// Build a [`ReviewError::ColumnNotFound`] for the given stage.
    pub fn missing_column(column: impl Into<String>, stage: impl Into<String>) -> Self {
        ReviewError::ColumnNotFound {
            column: column.into(),
            stage: stage.into(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReviewError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, preserved through any added context.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::ColumnNotFound { .. } => "SCHEMA_ERROR",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::InvalidConfig(_) => "CONFIG_ERROR",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Workbook(_) => "WORKBOOK_ERROR",
            Self::Chart { .. } => "CHART_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a missing input file.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<calamine::Error> for ReviewError {
    fn from(err: calamine::Error) -> Self {
        ReviewError::Workbook(err.to_string())
    }
}

impl From<crate::config::ConfigValidationError> for ReviewError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ReviewError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ReviewError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReviewError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReviewError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ReviewError::NotFound("data.xlsx".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            ReviewError::missing_column("Age", "row filter").error_code(),
            "SCHEMA_ERROR"
        );
        assert_eq!(
            ReviewError::EmptyDataset("statistics".to_string()).error_code(),
            "EMPTY_DATASET"
        );
    }

    #[test]
    fn test_missing_column_message() {
        let error = ReviewError::missing_column("Product_Reviews", "imputation");
        let message = error.to_string();
        assert!(message.contains("Product_Reviews"));
        assert!(message.contains("imputation"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(ReviewError::NotFound("x".to_string()).is_not_found());
        assert!(
            ReviewError::NotFound("x".to_string())
                .with_context("Loading dataset")
                .is_not_found()
        );
        assert!(!ReviewError::EmptyDataset("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_serialization() {
        let error = ReviewError::missing_column("Age", "row filter");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("SCHEMA_ERROR"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_empty_dataset_message() {
        let error = ReviewError::EmptyDataset("statistics require at least one record".to_string());
        assert_eq!(
            error.to_string(),
            "Dataset is empty: statistics require at least one record"
        );
    }

    #[test]
    fn test_with_context() {
        let error = ReviewError::EmptyDataset("extremes".to_string()).with_context("During analysis");
        assert!(error.to_string().contains("During analysis"));
        assert_eq!(error.error_code(), "EMPTY_DATASET");
    }
}
