//! CSV import of price history and trade logs, CSV export of indicators.
//!
//! Price CSV columns: timestamp, open, high, low, close, volume. Common
//! capitalized headers (`Date`, `Open`, `Close`, ...) are accepted as aliases.
//! Trade CSV columns follow the broker export: `Time`, `Action`,
//! `Price / share`, `Total`, `Result`; extra columns are ignored.

use super::timestamp::parse_timestamp;
use crate::domain::{Bar, IndicatorSeries, PriceSeries, RawTradeRecord};
use crate::error::{ChartError, Result};
use crate::indicators::MacdResult;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(
        alias = "Timestamp",
        alias = "Date",
        alias = "date",
        alias = "Datetime",
        alias = "Time",
        alias = "time"
    )]
    timestamp: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

/// Read a price series. Rows must already be in ascending timestamp order,
/// and every bar must pass [`Bar::is_sane`].
pub fn read_price_csv<R: Read>(reader: R) -> Result<PriceSeries> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();

    for (i, row) in rdr.deserialize::<PriceRow>().enumerate() {
        let row = row?;
        let timestamp = parse_timestamp(&row.timestamp).map_err(|e| e.at_row("price", i + 1))?;
        let bar = Bar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if !bar.is_sane() {
            return Err(ChartError::malformed(format!(
                "inconsistent bar at {timestamp}: open {}, high {}, low {}, close {}, volume {}",
                bar.open, bar.high, bar.low, bar.close, bar.volume
            ))
            .at_row("price", i + 1));
        }
        bars.push(bar);
    }

    debug!(bars = bars.len(), "read price CSV");
    PriceSeries::new(bars)
}

pub fn load_price_csv(path: &Path) -> Result<PriceSeries> {
    read_price_csv(File::open(path)?)
}

/// Read raw trade-log rows without interpreting them.
pub fn read_trade_csv<R: Read>(reader: R) -> Result<Vec<RawTradeRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records = rdr
        .deserialize::<RawTradeRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(records = records.len(), "read trade CSV");
    Ok(records)
}

pub fn load_trade_csv(path: &Path) -> Result<Vec<RawTradeRecord>> {
    read_trade_csv(File::open(path)?)
}

/// Export close, EMA overlays and MACD columns as CSV text.
///
/// Columns: timestamp, close, one column per EMA (named after the series),
/// then macd, macd_signal, macd_histogram when a MACD is given.
pub fn export_indicators_csv(
    series: &PriceSeries,
    emas: &[IndicatorSeries],
    macd: Option<&MacdResult>,
) -> Result<String> {
    let mut columns: Vec<&IndicatorSeries> = emas.iter().collect();
    if let Some(macd) = macd {
        columns.extend([macd.fast_line(), macd.signal_line(), macd.histogram()]);
    }
    if let Some(col) = columns.iter().find(|c| c.len() != series.len()) {
        return Err(ChartError::invalid_parameter(format!(
            "series '{}' has {} values but the price series has {} bars",
            col.name(),
            col.len(),
            series.len()
        )));
    }

    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["timestamp".to_string(), "close".to_string()];
    header.extend(columns.iter().map(|c| c.name().to_string()));
    wtr.write_record(&header)?;

    for (i, bar) in series.iter().enumerate() {
        let mut record = vec![
            bar.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.6}", bar.close),
        ];
        record.extend(columns.iter().map(|c| format!("{:.6}", c.values()[i])));
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(data).map_err(|e| ChartError::malformed(e.to_string()))
}
