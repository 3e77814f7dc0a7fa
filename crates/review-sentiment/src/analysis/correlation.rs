//! Per-brand sentiment and correlation between brands.
//!
//! Each brand contributes the sequence of its satisfaction values in dataset
//! order. Two brands are correlated by pairing their k-th reviews (Pearson),
//! truncated to the shorter sequence. A pair with fewer than two aligned
//! reviews, or with a constant sequence, has no coefficient.

use crate::error::Result;
use crate::types::{BRAND_COLUMN, BrandCorrelation, BrandMean, SATISFACTION_COLUMN};
use crate::utils::{any_value_to_string, column_values, has_column};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Correlate satisfaction across brands.
///
/// Returns [`BrandCorrelation::NotApplicable`] when the dataset has no
/// `Brand` column or fewer than two distinct brands.
pub fn brand_correlation(df: &DataFrame) -> Result<BrandCorrelation> {
    if !has_column(df, BRAND_COLUMN) {
        debug!("No '{}' column, skipping brand correlation", BRAND_COLUMN);
        return Ok(BrandCorrelation::NotApplicable {
            reason: format!("column '{}' is not present", BRAND_COLUMN),
        });
    }

    let groups = group_by_brand(df)?;
    if groups.len() < 2 {
        return Ok(BrandCorrelation::NotApplicable {
            reason: format!("{} distinct brand(s), at least 2 required", groups.len()),
        });
    }

    let brand_means: Vec<BrandMean> = groups
        .iter()
        .map(|(brand, values)| BrandMean {
            brand: brand.clone(),
            mean_satisfaction: values.iter().sum::<f64>() / values.len() as f64,
            record_count: values.len(),
        })
        .collect();

    let series: Vec<&[f64]> = groups.values().map(Vec::as_slice).collect();
    let brands: Vec<String> = groups.keys().cloned().collect();

    debug!("Correlating {} brands", brands.len());

    if brands.len() == 2 {
        return Ok(BrandCorrelation::Scalar {
            paired_records: paired_len(&brands[0], series[0], &brands[1], series[1]),
            brand_means,
            brands: (brands[0].clone(), brands[1].clone()),
            coefficient: pearson(series[0], series[1]),
        });
    }

    let mut coefficients = Vec::with_capacity(series.len());
    for (i, a) in series.iter().enumerate() {
        let mut row = Vec::with_capacity(series.len());
        for (j, b) in series.iter().enumerate() {
            if i < j {
                paired_len(&brands[i], a, &brands[j], b);
            }
            row.push(pearson(a, b));
        }
        coefficients.push(row);
    }

    Ok(BrandCorrelation::Matrix {
        brand_means,
        brands,
        coefficients,
    })
}

/// Satisfaction values per brand, brands sorted by name.
///
/// Records with a missing brand or a missing satisfaction are skipped.
pub(crate) fn group_by_brand(df: &DataFrame) -> Result<BTreeMap<String, Vec<f64>>> {
    let satisfaction = column_values(df, SATISFACTION_COLUMN, "brand correlation")?;
    let brands = df.column(BRAND_COLUMN)?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (idx, value) in satisfaction.into_iter().enumerate() {
        let brand = brands.get(idx)?;
        if matches!(brand, AnyValue::Null) {
            continue;
        }
        if let Some(value) = value {
            groups.entry(any_value_to_string(&brand)).or_default().push(value);
        }
    }

    Ok(groups)
}

/// Number of position-paired records for two brands.
///
/// The longer sequence is cut to the shorter one; the dropped records are
/// logged.
fn paired_len(brand_a: &str, a: &[f64], brand_b: &str, b: &[f64]) -> usize {
    let n = a.len().min(b.len());
    if a.len() != b.len() {
        debug!(
            "Pairing '{}' ({} records) with '{}' ({} records): using the first {}",
            brand_a,
            a.len(),
            brand_b,
            b.len(),
            n
        );
    }
    n
}

/// Pearson correlation of two sequences paired by position.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let (a, b) = (&a[..n], &b[..n]);

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some(covariance / (var_a.sqrt() * var_b.sqrt()))
}
