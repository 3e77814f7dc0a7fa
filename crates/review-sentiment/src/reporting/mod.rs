//! Report generation module.
//!
//! This module renders pipeline results for people and for machines, and
//! writes the cleaned dataset.
//!
//! # Reports
//!
//! - [`render_console_report`] produces the plain-text report printed by the CLI
//! - [`AnalysisReport`] is the JSON form used by `--json` and `--emit-report`
//!
//! # Example
//!
//! ```rust,ignore
//! use review_sentiment::reporting::{ReportGenerator, render_console_report};
//!
//! println!("{}", render_console_report(&result));
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"), "cleaned".into());
//! let csv_path = generator.write_dataset(&result.data)?;
//! let report = ReportGenerator::build_report("reviews.xlsx", Some("output/cleaned.csv"), &[], None, &result);
//! generator.write_report_to_file(&report, "reviews")?;
//! ```

mod console;
mod generator;

pub use console::{
    NO_CORRELATION_MESSAGE, format_correlation, format_record, format_statistics,
    narrative_summary, render_console_report,
};
pub use generator::{AnalysisReport, ReportGenerator};
