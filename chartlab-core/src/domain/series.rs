//! Price and indicator series.
//!
//! `PriceSeries` owns the bars in timestamp order. `IndicatorSeries` is a
//! derived, read-only column aligned 1:1 with the series it came from.

use super::bar::Bar;
use crate::error::{ChartError, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Ordered OHLCV bars with strictly increasing timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars already sorted by the data source.
    ///
    /// Duplicate or decreasing timestamps are rejected; the bars are not re-sorted.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        if let Some(i) = bars
            .windows(2)
            .position(|w| w[0].timestamp >= w[1].timestamp)
        {
            return Err(ChartError::malformed(format!(
                "timestamps must be strictly increasing: {} at index {} is followed by {}",
                bars[i].timestamp,
                i,
                bars[i + 1].timestamp
            )));
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Close prices as an indicator-shaped column named `close`.
    pub fn close_series(&self) -> IndicatorSeries {
        IndicatorSeries::aligned("close", self.timestamps(), self.closes())
    }

    /// Volumes as an indicator-shaped column named `volume`.
    pub fn volume_series(&self) -> IndicatorSeries {
        IndicatorSeries::aligned(
            "volume",
            self.timestamps(),
            self.bars.iter().map(|b| b.volume).collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// True when `column` sits on exactly this series' timestamps.
    pub fn is_aligned_with(&self, column: &IndicatorSeries) -> bool {
        self.bars
            .iter()
            .map(|b| b.timestamp)
            .eq(column.timestamps().iter().copied())
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// A named numeric column sharing the timestamp index of its source.
///
/// Never mutated after creation: fields are private and every transformation
/// returns a new series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    name: String,
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl IndicatorSeries {
    /// Build a series, rejecting a values column whose length differs from the index.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ChartError::invalid_parameter(format!(
                "series index has {} timestamps but {} values",
                timestamps.len(),
                values.len()
            )));
        }
        Ok(Self::aligned(name, timestamps, values))
    }

    /// Internal constructor for columns already known to match their index.
    pub(crate) fn aligned(
        name: impl Into<String>,
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self {
            name: name.into(),
            timestamps,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Same index, values transformed by `f`.
    pub fn map_values(&self, name: impl Into<String>, f: impl Fn(&[f64]) -> Vec<f64>) -> Self {
        Self::aligned(name, self.timestamps.clone(), f(&self.values))
    }

    /// Combine two series pointwise. Both must share the same timestamp index.
    pub fn zip_with(
        &self,
        other: &IndicatorSeries,
        name: impl Into<String>,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self> {
        if self.timestamps != other.timestamps {
            return Err(ChartError::invalid_parameter(format!(
                "series '{}' and '{}' are not aligned on the same timestamps",
                self.name, other.name
            )));
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self::aligned(name, self.timestamps.clone(), values))
    }

    /// Pointwise `self - other`.
    pub fn sub(&self, other: &IndicatorSeries, name: impl Into<String>) -> Result<Self> {
        self.zip_with(other, name, |a, b| a - b)
    }
}
