//! Domain types for ChartLab

pub mod bar;
pub mod series;
pub mod trade;

pub use bar::Bar;
pub use series::{IndicatorSeries, PriceSeries};
pub use trade::{RawTradeRecord, TradeAction, TradeEvent, TradeSide};

/// Create a synthetic daily series from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000 + i.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0 + i as f64,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}
