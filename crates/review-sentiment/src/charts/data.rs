//! Chart data preparation.
//!
//! Everything a chart shows is computed here from the cleaned dataset, so the
//! rendering layer only draws.

use crate::analysis::group_by_brand;
use crate::error::Result;
use crate::types::{BRAND_COLUMN, REVIEWS_COLUMN, ROLLING_AVERAGE_COLUMN};
use crate::utils::{any_value_to_string, column_values, has_column, require_column};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Share of one review category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Percentage of all records (0-100).
    pub percent: f64,
}

/// Series backing the three charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// `(record index, rolling average)` for every defined rolling value.
    pub trend: Vec<(usize, f64)>,
    /// Mean satisfaction per brand, sorted by brand. `None` without a `Brand` column.
    pub brand_averages: Option<Vec<(String, f64)>>,
    /// Review categories by descending count.
    pub review_distribution: Vec<CategoryShare>,
}

impl ChartData {
    /// Prepare chart series from a dataset that has passed every cleaning stage.
    pub fn from_dataset(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            trend: trend_points(df)?,
            brand_averages: brand_averages(df)?,
            review_distribution: review_distribution(df)?,
        })
    }
}

fn trend_points(df: &DataFrame) -> Result<Vec<(usize, f64)>> {
    Ok(column_values(df, ROLLING_AVERAGE_COLUMN, "chart data")?
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|value| (i, value)))
        .collect())
}

fn brand_averages(df: &DataFrame) -> Result<Option<Vec<(String, f64)>>> {
    if !has_column(df, BRAND_COLUMN) {
        return Ok(None);
    }

    let averages = group_by_brand(df)?
        .into_iter()
        .map(|(brand, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (brand, mean)
        })
        .collect();

    Ok(Some(averages))
}

/// Count records per review category; ties keep first-appearance order.
fn review_distribution(df: &DataFrame) -> Result<Vec<CategoryShare>> {
    let column = require_column(df, REVIEWS_COLUMN, "chart data")?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..column.len() {
        let value = column.get(idx)?;
        if matches!(value, AnyValue::Null) {
            continue;
        }
        let category = any_value_to_string(&value);
        let count = counts.entry(category.clone()).or_insert(0);
        if *count == 0 {
            order.push(category);
        }
        *count += 1;
    }

    let total: usize = counts.values().sum();
    let mut shares: Vec<CategoryShare> = order
        .into_iter()
        .map(|category| {
            let count = counts.get(&category).copied().unwrap_or(0);
            CategoryShare {
                percent: count as f64 / total as f64 * 100.0,
                category,
                count,
            }
        })
        .collect();

    // Stable sort keeps first-appearance order among equal counts.
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(shares)
}
