//! End-to-end chart pipeline: config + prices + trade log → figure.
//!
//! Two entry points:
//! - `build_figure()`: takes pre-loaded series and raw trade rows.
//! - `render_files()`: loads price and trade CSVs from disk first.

use crate::chart::{ChartComposer, ChartLayoutPlan, ChartRequest, RenderableFigure};
use crate::config::ChartConfig;
use crate::data::{load_price_csv, load_trade_csv};
use crate::domain::{PriceSeries, RawTradeRecord};
use crate::error::Result;
use crate::indicators::compute_macd;
use crate::trades::TradeEventClassifier;
use std::path::Path;
use tracing::{debug, info};

/// Classify trades, compute MACD if configured, plan the layout and compose.
pub fn build_figure(
    config: &ChartConfig,
    series: &PriceSeries,
    raw_trades: Option<&[RawTradeRecord]>,
) -> Result<RenderableFigure> {
    config.validate()?;

    let trades = raw_trades
        .map(|raw| TradeEventClassifier::new(config.excluded_actions.iter().cloned()).classify(raw))
        .transpose()?;

    let macd = config
        .macd
        .map(|p| compute_macd(series, p.fast, p.slow, p.signal))
        .transpose()?;

    let layout = ChartLayoutPlan::plan(macd.is_some(), config.show_volume);
    let volume = config.show_volume.then(|| series.volume_series());

    let mut request = ChartRequest::new(series, &layout)
        .ticker(&config.ticker)
        .ema_spans(&config.ema_periods)
        .style(config.style());
    if let Some(trades) = &trades {
        request = request.trades(trades);
    }
    if let Some(macd) = &macd {
        request = request.macd(macd);
    }
    if let Some(volume) = &volume {
        request = request.volume(volume);
    }

    debug!(
        bars = series.len(),
        trades = trades.as_ref().map_or(0, Vec::len),
        emas = config.ema_periods.len(),
        "building figure"
    );
    ChartComposer::new(config.theme.clone()).compose(&request)
}

/// Load CSV inputs and build the figure.
pub fn render_files(
    config: &ChartConfig,
    prices: &Path,
    trades: Option<&Path>,
) -> Result<RenderableFigure> {
    let series = load_price_csv(prices)?;
    let raw_trades = trades.map(load_trade_csv).transpose()?;
    info!(
        prices = %prices.display(),
        bars = series.len(),
        trade_rows = raw_trades.as_ref().map_or(0, Vec::len),
        "loaded chart inputs"
    );
    build_figure(config, &series, raw_trades.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{LayerKind, SeriesRole};
    use crate::domain::make_series;
    use crate::error::ChartError;
    use crate::indicators::MacdParams;
    use std::io::Write;

    const CLOSES: [f64; 8] = [100.0, 102.0, 101.0, 105.0, 107.0, 106.0, 108.0, 110.0];

    fn raw(time: &str, action: &str, price: f64) -> RawTradeRecord {
        RawTradeRecord {
            time: time.into(),
            action: action.into(),
            price,
            total: price * 10.0,
            result: None,
        }
    }

    #[test]
    fn default_config_draws_price_and_two_emas() {
        let series = make_series(&CLOSES);
        let fig = build_figure(&ChartConfig::default(), &series, None).unwrap();
        assert_eq!(fig.layout.panel_count(), 1);
        assert_eq!(fig.layers.len(), 3);
        assert!(fig.layer("EMA_13").is_some());
        assert!(fig.layer("EMA_26").is_some());
    }

    #[test]
    fn full_config_uses_four_panels() {
        let series = make_series(&CLOSES);
        let config = ChartConfig {
            ticker: "AAPL".into(),
            macd: Some(MacdParams::new(3, 6, 2)),
            show_volume: true,
            ..ChartConfig::default()
        };
        let fig = build_figure(&config, &series, None).unwrap();
        assert_eq!(fig.title, "AAPL Price with MACD");
        assert_eq!(
            fig.layout.heights(),
            vec![4.0 / 7.0, 1.0 / 7.0, 1.0 / 7.0, 1.0 / 7.0]
        );
        let total: f64 = fig.layout.heights().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert_eq!(fig.layer("Volume").unwrap().panel, 4);
        assert_eq!(fig.layer("MACD Histogram").unwrap().panel, 3);
    }

    #[test]
    fn trades_are_classified_and_excluded() {
        let series = make_series(&CLOSES);
        let trades = vec![
            raw("2024-01-05", "Market sell", 105.0),
            raw("2024-01-03", "Market buy", 102.0),
            raw("2024-01-04", "Deposit", 0.0),
            raw("2024-01-04", "Limit buy", 101.0),
        ];
        let config = ChartConfig {
            ema_periods: vec![],
            excluded_actions: vec!["Limit buy".into()],
            ..ChartConfig::default()
        };
        let fig = build_figure(&config, &series, Some(&trades)).unwrap();
        let names: Vec<&str> = fig
            .layers_with_role(SeriesRole::TradeMarkers)
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Market buy", "Market sell"]);
    }

    #[test]
    fn malformed_trade_time_fails() {
        let series = make_series(&CLOSES);
        let trades = vec![raw("yesterday", "Market buy", 1.0)];
        let err = build_figure(&ChartConfig::default(), &series, Some(&trades)).unwrap_err();
        assert!(matches!(err, ChartError::MalformedInput(_)));
    }

    #[test]
    fn empty_series_fails_on_overlays() {
        let series = PriceSeries::new(vec![]).unwrap();
        let err = build_figure(&ChartConfig::default(), &series, None).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn render_files_reads_csv_inputs() {
        let mut prices = tempfile::NamedTempFile::new().unwrap();
        write!(
            prices,
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,100,101,99,100.5,1200\n\
             2024-01-03,100.5,103,100,102,1500\n"
        )
        .unwrap();
        let mut trades = tempfile::NamedTempFile::new().unwrap();
        write!(
            trades,
            "Time,Action,Price / share,Total,Result\n\
             2024-01-03 10:30:00,Market buy,101.5,1015,\n"
        )
        .unwrap();

        let config = ChartConfig {
            candlestick: false,
            ema_periods: vec![2],
            ..ChartConfig::default()
        };
        let fig = render_files(&config, prices.path(), Some(trades.path())).unwrap();
        assert!(matches!(
            &fig.layer("Close Price").unwrap().kind,
            LayerKind::Line { y, .. } if y.as_slice() == [100.5, 102.0]
        ));
        assert_eq!(fig.layer("Market buy").unwrap().kind.len(), 1);
    }
}
