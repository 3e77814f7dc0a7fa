//! CLI entry point for the review sentiment pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use review_sentiment::cleaner::normalize_column_names;
use review_sentiment::types::{AGE_COLUMN, BRAND_COLUMN, REVIEWS_COLUMN, SATISFACTION_COLUMN};
use review_sentiment::{
    AnalysisReport, MeanFallback, Pipeline, PipelineConfig, PipelineResult, ReportGenerator,
    load_dataset, render_console_report,
};
use std::path::Path;
use tracing::{error, info};

/// CLI-compatible fallback for an all-missing satisfaction column
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMeanFallback {
    /// Leave the values missing and record a warning
    LeaveMissing,
    /// Fill the values with zero
    Zero,
}

impl From<CliMeanFallback> for MeanFallback {
    fn from(cli: CliMeanFallback) -> Self {
        match cli {
            CliMeanFallback::LeaveMissing => MeanFallback::LeaveMissing,
            CliMeanFallback::Zero => MeanFallback::Zero,
        }
    }
}

/// Review sentiment pipeline
///
/// Cleans a product review spreadsheet, fills in missing values, adds a
/// rolling sentiment average and reports summary statistics, extreme reviews
/// and brand correlation.
#[derive(Parser, Debug)]
#[command(name = "review-sentiment")]
#[command(author, version, about, long_about = r#"
Review sentiment pipeline

Loads a review dataset (xlsx or csv), normalizes column names, drops rows
with a missing or negative Age, clamps Satisfaction_Percentage to 0-100,
imputes missing values and adds a rolling average. Writes the cleaned CSV
and three PNG charts, then prints a summary.

EXAMPLES:
    # Basic usage
    review-sentiment -i Product_reviews.xlsx

    # Custom output directory and rolling window
    review-sentiment -i reviews.csv -o results/ --window 5

    # Preview without writing anything
    review-sentiment -i reviews.csv --dry-run

    # Machine-readable output
    review-sentiment -i reviews.csv --json | jq .statistics
"#)]
struct Args {
    /// Input dataset (xlsx, xls, ods, csv or tsv)
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned CSV and charts
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses "cleaned_transformed_data"
    #[arg(long)]
    output_name: Option<String>,

    /// Rolling average window size (must be at least 1)
    #[arg(short, long, default_value = "3")]
    window: usize,

    /// What to do when every satisfaction value is missing
    #[arg(long, value_enum, default_value = "leave-missing")]
    mean_fallback: CliMeanFallback,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Preview what the pipeline will do without processing
    ///
    /// Shows the normalized columns and the planned stages
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the console report
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let mut config_builder = PipelineConfig::builder()
        .output_dir(&args.output)
        .rolling_window(args.window)
        .mean_fallback(args.mean_fallback.into())
        .generate_charts(!args.no_charts);

    if let Some(ref name) = args.output_name {
        config_builder = config_builder.output_name(name);
    }

    let config = config_builder.build()?;

    if args.dry_run {
        return run_dry_run(&args, &config);
    }

    let pipeline = build_pipeline(&args, config)?;

    run_pipeline(&pipeline, &args)
}

/// Build the pipeline, logging progress unless quiet.
fn build_pipeline(args: &Args, config: PipelineConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Run the pipeline, then write the artifacts and print results.
///
/// A failing run writes nothing.
fn run_pipeline(pipeline: &Pipeline, args: &Args) -> Result<()> {
    info!("{}", "=".repeat(80));
    info!("Starting review pipeline...");
    info!("{}", "=".repeat(80));

    let mut result = match pipeline.run(&args.input) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed [{}]: {}", e.error_code(), e));
        }
    };

    let export = pipeline.export(&mut result)?;
    let output_file = export.dataset.as_ref().map(|p| p.display().to_string());

    let report = ReportGenerator::build_report(
        &args.input,
        output_file.as_deref(),
        &export.charts,
        export.chart_data,
        &result,
    );

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = pipeline
            .report_generator()
            .write_report_to_file(&report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_summary(&result, &report);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the console report followed by the processing summary.
fn print_human_readable_summary(result: &PipelineResult, report: &AnalysisReport) {
    let summary = &result.summary;

    println!();
    println!("{}", render_console_report(result));
    println!();
    println!("{}", "=".repeat(80));
    println!("PROCESSING SUMMARY");
    println!("{}", "=".repeat(80));
    println!("  Input:  {}", report.input_file);
    if let Some(ref output_file) = report.output_file {
        println!("  Output: {}", output_file);
    }
    for chart in &report.charts {
        println!("  Chart:  {}", chart);
    }
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    println!("  Values clamped: {}", summary.values_clamped);
    println!("  Values imputed: {}", summary.total_imputed());
    for imputation in &summary.imputations {
        println!(
            "    - {}: {} filled with {}",
            imputation.column, imputation.filled, imputation.value
        );
    }
    println!("  Rolling window: {}", summary.rolling_window);

    if !summary.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  ! {}", warning);
        }
    }

    println!();
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}

/// Run dry-run mode - show what would happen without processing
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn run_dry_run(args: &Args, config: &PipelineConfig) -> Result<()> {
    let mut data = load_dataset(&args.input)?;
    let renamed = normalize_column_names(&mut data)?;

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of pipeline actions");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input);
    println!("  Rows: {}", data.height());
    println!("  Columns: {}", data.width());
    println!();

    println!("COLUMNS");
    println!("{}", "-".repeat(40));
    println!("{:<30} {:<12} {:<10}", "Column", "Type", "Missing");
    println!("{}", "-".repeat(54));
    for column in data.get_columns() {
        println!(
            "{:<30} {:<12} {:<10}",
            truncate_str(column.name(), 29),
            column.dtype().to_string(),
            column.null_count()
        );
    }
    println!();

    if !renamed.is_empty() {
        println!("RENAMED COLUMNS");
        println!("{}", "-".repeat(40));
        for (from, to) in &renamed {
            println!("  '{}' -> '{}'", from, to);
        }
        println!();
    }

    println!("REQUIRED COLUMNS");
    println!("{}", "-".repeat(40));
    for required in [AGE_COLUMN, SATISFACTION_COLUMN, REVIEWS_COLUMN] {
        let status = if data.column(required).is_ok() {
            "present"
        } else {
            "MISSING"
        };
        println!("  {:<26} {}", required, status);
    }
    if data.column(BRAND_COLUMN).is_err() {
        println!("  No {} column: correlation and brand chart will be skipped", BRAND_COLUMN);
    }
    println!();

    println!("PROPOSED ACTIONS");
    println!("{}", "-".repeat(40));
    println!("  1. Drop rows with a missing or negative {}", AGE_COLUMN);
    println!(
        "  2. Clamp {} to [{}, {}]",
        SATISFACTION_COLUMN, config.satisfaction_min, config.satisfaction_max
    );
    println!(
        "  3. Impute missing values (mean fallback: {:?})",
        config.mean_fallback
    );
    println!("  4. Add rolling average (window: {})", config.rolling_window);
    println!("  5. Compute statistics, extremes and brand correlation");
    println!();

    println!("OUTPUT FILES (will be created)");
    println!("{}", "-".repeat(40));
    if config.generate_charts {
        for chart in [
            review_sentiment::charts::TREND_CHART_FILE,
            review_sentiment::charts::BRAND_CHART_FILE,
            review_sentiment::charts::DISTRIBUTION_CHART_FILE,
        ] {
            println!("  - {}", config.output_dir.join(chart).display());
        }
    }
    println!("  - {}", config.output_csv_path().display());
    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_file = format!("{}_report.json", input_stem);
        println!("  - {}", config.output_dir.join(report_file).display());
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("To execute the pipeline, run without --dry-run");
    println!("{}", "=".repeat(80));

    Ok(())
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
