//! Dataset loading.
//!
//! Reads a review spreadsheet (xlsx/xlsm/xls/xlsb/ods) or a delimited text
//! file into a Polars DataFrame. The file is opened, fully read and closed
//! before any transformation runs.

use crate::error::{Result, ReviewError};
use calamine::{Data, Reader, open_workbook_auto};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tabular formats the loader understands, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Csv,
    Tsv,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" | "txt" => Ok(Self::Tsv),
            _ => Err(ReviewError::UnsupportedFormat(extension)),
        }
    }
}

/// Load a dataset from disk.
///
/// # Errors
///
/// Returns [`ReviewError::NotFound`] if the path does not name an existing
/// file, [`ReviewError::UnsupportedFormat`] for an unknown extension, and
/// workbook/Polars errors for files that cannot be decoded.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ReviewError::NotFound(path.display().to_string()));
    }

    let format = InputFormat::from_path(path)?;
    info!("Loading dataset from: {} ({:?})", path.display(), format);

    let df = match format {
        InputFormat::Workbook => load_workbook(path)?,
        InputFormat::Csv => load_delimited(path, b',')?,
        InputFormat::Tsv => load_delimited(path, b'\t')?,
    };

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

// ============================================================================
// Workbooks
// ============================================================================

/// Read the first sheet of a workbook; the first row is the header.
fn load_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(ReviewError::Workbook(format!(
            "{} has no sheets",
            path.display()
        )));
    };
    debug!(
        "Reading sheet '{}' (first of {} sheets)",
        sheet_name,
        sheet_names.len()
    );

    let range = workbook.worksheet_range(sheet_name)?;
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = dedupe_headers(header_row.iter().enumerate().map(|(i, cell)| match cell {
        Data::Empty => format!("Unnamed: {}", i),
        other => cell_text(other).unwrap_or_else(|| format!("Unnamed: {}", i)),
    }));

    let mut cells: Vec<Vec<&Data>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (col_idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(col_idx).unwrap_or(&Data::Empty));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, values)| workbook_column(name, &values))
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Build one column: `Float64` if every non-empty cell is numeric, else `String`.
fn workbook_column(name: &str, values: &[&Data]) -> Column {
    let all_numeric = values
        .iter()
        .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_) | Data::Empty | Data::Error(_)));

    if all_numeric {
        let numbers: Vec<Option<f64>> = values.iter().map(|cell| cell_number(cell)).collect();
        Series::new(name.into(), numbers).into_column()
    } else {
        let text: Vec<Option<String>> = values.iter().map(|cell| cell_text(cell)).collect();
        Series::new(name.into(), text).into_column()
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) if !f.is_nan() => Some(*f),
        _ => None,
    }
}

/// Text of a cell; empty and error cells are missing.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) if f.is_nan() => None,
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

/// Suffix repeated header names with `.1`, `.2`, ... so column names stay unique.
fn dedupe_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .map(|header| {
            let count = seen.entry(header.clone()).or_insert(0);
            let name = if *count == 0 {
                header
            } else {
                format!("{}.{}", header, count)
            };
            *count += 1;
            name
        })
        .collect()
}

// ============================================================================
// Delimited text
// ============================================================================

/// Load delimited text with fallback strategies.
fn load_delimited(path: &Path, separator: u8) -> Result<DataFrame> {
    // Strategy 1: Standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Read every column as text; numeric stages parse what they need
    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_truncate_ragged_lines(true),
        )
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(ReviewError::from)
}
