use crate::charts::ChartData;
use crate::error::Result;
use crate::types::{
    BrandCorrelation, ExtremeRecords, PipelineResult, ProcessingSummary, SentimentStatistics,
};
use chrono::Local;
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::console::narrative_summary;

// ============================================================================
// Report Types
// ============================================================================

/// Machine-readable report of one pipeline run.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the cleaned CSV (if written)
    pub output_file: Option<String>,
    /// Chart files written
    pub charts: Vec<String>,
    pub statistics: Option<SentimentStatistics>,
    pub extremes: Option<ExtremeRecords>,
    pub correlation: BrandCorrelation,
    /// Chart series (trend, brand averages, review distribution)
    pub chart_data: Option<ChartData>,
    pub processing_summary: ProcessingSummary,
    /// The three-line findings summary
    pub narrative: String,
}

/// Writes the cleaned dataset and reports to the output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: String) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the cleaned CSV is written to.
    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_name))
    }

    /// Write the dataset as CSV: header row, every column, no index column.
    ///
    /// Missing cells (the leading rolling averages) are written as empty fields.
    pub fn write_dataset(&self, df: &DataFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.dataset_path();

        let mut df = df.clone();
        let mut file = File::create(&output_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)?;

        info!("Dataset saved: {}", output_path.display());
        debug!("Wrote {} rows x {} columns", df.height(), df.width());
        Ok(output_path)
    }

    /// Build a report from pipeline results.
    pub fn build_report(
        input_file: &str,
        output_file: Option<&str>,
        charts: &[PathBuf],
        chart_data: Option<ChartData>,
        result: &PipelineResult,
    ) -> AnalysisReport {
        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(String::from),
            charts: charts.iter().map(|p| p.display().to_string()).collect(),
            statistics: result.statistics,
            extremes: result.extremes.clone(),
            correlation: result.correlation.clone(),
            chart_data,
            processing_summary: result.summary.clone(),
            narrative: narrative_summary(result),
        }
    }

    /// Write a report to a JSON file.
    ///
    /// If `report_base_name` is "reviews", the file will be "reviews_report.json".
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReviewRecord;

    fn sample_result() -> PipelineResult {
        let record = ReviewRecord {
            index: 0,
            satisfaction: 80.0,
            fields: vec![("Name".to_string(), "Alice".to_string())],
        };
        PipelineResult {
            data: df![
                "Name" => ["Alice", "Bob"],
                "Satisfaction_Percentage" => [80.0, 40.0],
                "Sentiment_Rolling_Average" => [None, Some(60.0)],
            ]
            .unwrap(),
            statistics: Some(SentimentStatistics {
                mean: 60.0,
                median: 60.0,
                standard_deviation: Some(28.28),
                count: 2,
            }),
            extremes: Some(ExtremeRecords {
                most_positive: record.clone(),
                most_negative: record,
            }),
            correlation: BrandCorrelation::NotApplicable {
                reason: "no brand".to_string(),
            },
            summary: ProcessingSummary::new(),
        }
    }

    #[test]
    fn test_write_dataset_without_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path().to_path_buf(), "cleaned".to_string());

        let path = generator.write_dataset(&sample_result().data).unwrap();

        assert_eq!(path, dir.path().join("cleaned.csv"));
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Satisfaction_Percentage,Sentiment_Rolling_Average")
        );
        assert_eq!(lines.next(), Some("Alice,80.0,"));
        assert_eq!(lines.next(), Some("Bob,40.0,60.0"));
    }

    #[test]
    fn test_write_dataset_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("out");
        let generator = ReportGenerator::new(nested.clone(), "data".to_string());

        generator.write_dataset(&sample_result().data).unwrap();

        assert!(nested.join("data.csv").is_file());
    }

    #[test]
    fn test_build_and_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path().to_path_buf(), "cleaned".to_string());
        let result = sample_result();

        let report = ReportGenerator::build_report(
            "Product_reviews.xlsx",
            Some("cleaned.csv"),
            &[],
            None,
            &result,
        );
        assert!(report.narrative.contains("came from Alice"));

        let path = generator.write_report_to_file(&report, "Product_reviews").unwrap();
        assert!(path.ends_with("Product_reviews_report.json"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["input_file"], "Product_reviews.xlsx");
        assert_eq!(json["statistics"]["mean"], 60.0);
        assert_eq!(json["correlation"]["kind"], "not_applicable");
    }
}
