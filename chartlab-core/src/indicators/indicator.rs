//! Indicator trait.
//!
//! Indicators are pure functions: price series in, aligned numeric series out.

use crate::domain::{IndicatorSeries, PriceSeries};
use crate::error::Result;

/// Trait for single-series indicators.
///
/// `compute` returns a series with exactly one value per input bar, on the
/// same timestamps, or an error when the input cannot support the indicator.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "EMA_13"), also used as the series name.
    fn name(&self) -> &str;

    /// Compute the indicator for the entire price series.
    fn compute(&self, series: &PriceSeries) -> Result<IndicatorSeries>;
}
