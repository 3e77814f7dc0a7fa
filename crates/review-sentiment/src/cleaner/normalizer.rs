//! Column name normalization.

use crate::error::{Result, ResultExt};
use polars::prelude::*;

/// Trim surrounding whitespace and replace spaces with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Normalize every column name of the dataset in place.
///
/// Idempotent: a second run renames nothing. Two columns that normalize to
/// the same name are reported as a Polars duplicate-column error.
pub fn normalize_column_names(df: &mut DataFrame) -> Result<Vec<(String, String)>> {
    let renamed: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .map(|name| (name.to_string(), normalize_column_name(name)))
        .filter(|(old, new)| old != new)
        .collect();

    for (old, new) in &renamed {
        df.rename(old, new.as_str().into())
            .context(format!("Normalizing column '{}'", old))?;
    }

    Ok(renamed)
}
