//! Column-oriented price table.
//!
//! The shape price data arrives in from tabular sources: one timestamp index
//! plus named numeric columns. Column lookup ignores ASCII case, so `Close`
//! and `close` name the same column.

use crate::domain::{Bar, IndicatorSeries, PriceSeries};
use crate::error::{ChartError, Result};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<(String, Vec<f64>)>,
}

impl PriceTable {
    pub fn new(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Add (or replace) a column. Its length must match the index.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(ChartError::invalid_parameter(format!(
                "column '{name}' has {} values but the index has {} rows",
                values.len(),
                self.index.len()
            )));
        }
        match self.position(&name) {
            Some(i) => self.columns[i].1 = values,
            None => self.columns.push((name, values)),
        }
        Ok(self)
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.columns[i].1.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// A column as an indicator-shaped series on the table index.
    pub fn series(&self, name: &str) -> Result<IndicatorSeries> {
        let values = self.require(name)?;
        IndicatorSeries::new(name.to_ascii_lowercase(), self.index.clone(), values.to_vec())
    }

    /// Convert to bars. open, high, low, close and volume must all be present.
    pub fn to_series(&self) -> Result<PriceSeries> {
        let open = self.require("open")?;
        let high = self.require("high")?;
        let low = self.require("low")?;
        let close = self.require("close")?;
        let volume = self.require("volume")?;

        let bars = self
            .index
            .iter()
            .enumerate()
            .map(|(i, &timestamp)| Bar {
                timestamp,
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume[i],
            })
            .collect();
        PriceSeries::new(bars)
    }

    fn require(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| {
            ChartError::invalid_parameter(format!(
                "price table must contain a '{name}' column"
            ))
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(col, _)| col.eq_ignore_ascii_case(name))
    }
}

impl From<&PriceSeries> for PriceTable {
    fn from(series: &PriceSeries) -> Self {
        let bars = series.bars();
        Self {
            index: series.timestamps(),
            columns: vec![
                ("open".into(), bars.iter().map(|b| b.open).collect()),
                ("high".into(), bars.iter().map(|b| b.high).collect()),
                ("low".into(), bars.iter().map(|b| b.low).collect()),
                ("close".into(), bars.iter().map(|b| b.close).collect()),
                ("volume".into(), bars.iter().map(|b| b.volume).collect()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_series;

    #[test]
    fn roundtrip_through_series() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        let table = PriceTable::from(&series);
        assert_eq!(table.len(), 3);
        assert_eq!(table.to_series().unwrap(), series);
    }

    #[test]
    fn column_lookup_ignores_case() {
        let series = make_series(&[10.0, 11.0]);
        let table = PriceTable::new(series.timestamps())
            .with_column("Close", vec![1.0, 2.0])
            .unwrap();
        assert!(table.has_column("close"));
        assert_eq!(table.column("CLOSE"), Some(&[1.0, 2.0][..]));
        assert_eq!(table.series("Close").unwrap().name(), "close");
    }

    #[test]
    fn with_column_replaces_existing() {
        let series = make_series(&[10.0, 11.0]);
        let table = PriceTable::new(series.timestamps())
            .with_column("close", vec![1.0, 2.0])
            .unwrap()
            .with_column("Close", vec![3.0, 4.0])
            .unwrap();
        assert_eq!(table.column_names().count(), 1);
        assert_eq!(table.column("close"), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn with_column_rejects_length_mismatch() {
        let series = make_series(&[10.0, 11.0]);
        let err = PriceTable::new(series.timestamps())
            .with_column("close", vec![1.0])
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn to_series_names_missing_column() {
        let series = make_series(&[10.0, 11.0]);
        let table = PriceTable::new(series.timestamps())
            .with_column("open", vec![1.0, 2.0])
            .unwrap();
        let err = table.to_series().unwrap_err();
        assert!(err.to_string().contains("'high'"));
    }
}
