use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Column holding the reviewer's age.
pub const AGE_COLUMN: &str = "Age";
/// Column holding the satisfaction score (0-100).
pub const SATISFACTION_COLUMN: &str = "Satisfaction_Percentage";
/// Column holding the review category.
pub const REVIEWS_COLUMN: &str = "Product_Reviews";
/// Column identifying the reviewer.
pub const NAME_COLUMN: &str = "Name";
/// Optional column holding the reviewed brand.
pub const BRAND_COLUMN: &str = "Brand";
/// Derived column with the trailing mean of satisfaction.
pub const ROLLING_AVERAGE_COLUMN: &str = "Sentiment_Rolling_Average";

/// One row of the dataset, rendered as text for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Position of the record in the cleaned dataset.
    pub index: usize,
    /// `Satisfaction_Percentage` of the record.
    pub satisfaction: f64,
    /// Every column of the record as `(column, value)` in dataset order.
    pub fields: Vec<(String, String)>,
}

impl ReviewRecord {
    /// Look up a field by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// The reviewer's name, or an empty string if the column is absent.
    pub fn name(&self) -> &str {
        self.get(NAME_COLUMN).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator). `None` for a single record.
    pub standard_deviation: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeRecords {
    pub most_positive: ReviewRecord,
    pub most_negative: ReviewRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandMean {
    pub brand: String,
    pub mean_satisfaction: f64,
    pub record_count: usize,
}

/// Outcome of the brand correlation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrandCorrelation {
    /// Correlation is undefined (no `Brand` column, or fewer than two brands).
    NotApplicable { reason: String },
    /// Exactly two brands: a single coefficient.
    Scalar {
        brand_means: Vec<BrandMean>,
        brands: (String, String),
        coefficient: Option<f64>,
        /// Records paired by position; the longer brand is cut to this length.
        paired_records: usize,
    },
    /// Three or more brands: a symmetric matrix ordered like `brands`.
    Matrix {
        brand_means: Vec<BrandMean>,
        brands: Vec<String>,
        coefficients: Vec<Vec<Option<f64>>>,
    },
}

impl BrandCorrelation {
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable { .. })
    }

    /// Per-brand means, empty when not applicable.
    pub fn brand_means(&self) -> &[BrandMean] {
        match self {
            Self::NotApplicable { .. } => &[],
            Self::Scalar { brand_means, .. } | Self::Matrix { brand_means, .. } => brand_means,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationRecord {
    pub column: String,
    pub filled: usize,
    pub value: String,
}

/// Summary of what the cleaning stages did to the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,
    pub columns: Vec<String>,
    pub renamed_columns: Vec<(String, String)>,
    pub values_clamped: usize,
    pub imputations: Vec<ImputationRecord>,
    pub rolling_window: usize,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl ProcessingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn add_imputation(&mut self, column: &str, filled: usize, value: impl Into<String>) {
        if filled > 0 {
            self.imputations.push(ImputationRecord {
                column: column.to_string(),
                filled,
                value: value.into(),
            });
        }
    }

    /// Total number of cells filled across all columns.
    pub fn total_imputed(&self) -> usize {
        self.imputations.iter().map(|i| i.filled).sum()
    }
}

/// Everything the pipeline produces for downstream consumers.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The cleaned dataset, including `Sentiment_Rolling_Average`.
    pub data: DataFrame,
    /// `None` when no record has a satisfaction value.
    pub statistics: Option<SentimentStatistics>,
    /// `None` when no record has a satisfaction value.
    pub extremes: Option<ExtremeRecords>,
    pub correlation: BrandCorrelation,
    pub summary: ProcessingSummary,
}
