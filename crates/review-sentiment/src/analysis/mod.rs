//! Analysis of the cleaned review dataset.
//!
//! The functions here read the dataset and never modify it, except for
//! [`add_rolling_average`] which derives the rolling sentiment column.

mod correlation;
mod extremes;
mod rolling;
mod statistics;

pub use correlation::brand_correlation;
pub(crate) use correlation::group_by_brand;
pub use extremes::find_extremes;
pub use rolling::{add_rolling_average, rolling_mean};
pub use statistics::{describe, sentiment_statistics};
