//! Chart composition: price, overlays, markers, MACD and volume into one figure.
//!
//! Layer order in the output:
//! 1. price (candlestick or close line), panel 1
//! 2. one dashed EMA line per requested span, in request order, panel 1
//! 3. trade marker groups: Market buy, Market sell, Limit buy, Limit sell, panel 1
//! 4. MACD fast and signal lines in the MACD panel, histogram bars below it
//! 5. volume bars in the last panel

use super::figure::{
    Candle, Dash, Layer, LayerKind, LineStyle, MarkerSymbol, RenderableFigure, TradeMarker,
};
use super::layout::{ChartLayoutPlan, SeriesRole};
use super::theme::Theme;
use crate::domain::{IndicatorSeries, PriceSeries, TradeAction, TradeEvent, TradeSide};
use crate::error::{ChartError, Result};
use crate::indicators::{Ema, Indicator, MacdResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const FIGURE_WIDTH: u32 = 1200;
pub const FIGURE_HEIGHT: u32 = 900;
pub const X_TICK_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// OHLC candles when true, a close-price line otherwise.
    pub candlestick: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self { candlestick: true }
    }
}

/// Everything one chart is built from.
#[derive(Debug, Clone, Copy)]
pub struct ChartRequest<'a> {
    pub series: &'a PriceSeries,
    pub ticker: &'a str,
    pub ema_spans: &'a [usize],
    pub trades: Option<&'a [TradeEvent]>,
    pub macd: Option<&'a MacdResult>,
    pub volume: Option<&'a IndicatorSeries>,
    pub layout: &'a ChartLayoutPlan,
    pub style: ChartStyle,
}

impl<'a> ChartRequest<'a> {
    /// Price-only request: no overlays, markers, MACD or volume.
    pub fn new(series: &'a PriceSeries, layout: &'a ChartLayoutPlan) -> Self {
        Self {
            series,
            ticker: "",
            ema_spans: &[],
            trades: None,
            macd: None,
            volume: None,
            layout,
            style: ChartStyle::default(),
        }
    }

    pub fn ticker(mut self, ticker: &'a str) -> Self {
        self.ticker = ticker;
        self
    }

    pub fn ema_spans(mut self, spans: &'a [usize]) -> Self {
        self.ema_spans = spans;
        self
    }

    pub fn trades(mut self, trades: &'a [TradeEvent]) -> Self {
        self.trades = Some(trades);
        self
    }

    pub fn macd(mut self, macd: &'a MacdResult) -> Self {
        self.macd = Some(macd);
        self
    }

    pub fn volume(mut self, volume: &'a IndicatorSeries) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartComposer {
    theme: Theme,
}

impl ChartComposer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Build the figure. Fails before producing any layer if the request is
    /// inconsistent.
    pub fn compose(&self, req: &ChartRequest<'_>) -> Result<RenderableFigure> {
        check_macd_consistency(req)?;
        check_alignment(req)?;

        let layout = req.layout;
        let mut layers = Vec::new();

        layers.push(self.price_layer(req));

        for &span in req.ema_spans {
            let ema = Ema::new(span)?;
            let values = ema.compute(req.series)?;
            layers.push(Layer {
                name: ema.name().to_string(),
                panel: 1,
                role: SeriesRole::EmaOverlay,
                kind: line_kind(&values, LineStyle::dashed()),
            });
        }

        if let Some(trades) = req.trades {
            layers.extend(self.marker_layers(trades));
        }

        if let (Some(macd), Some(macd_panel), Some(hist_panel)) = (
            req.macd,
            layout.panel_for(SeriesRole::MacdLine),
            layout.panel_for(SeriesRole::Histogram),
        ) {
            layers.extend(self.macd_layers(macd, macd_panel, hist_panel));
        }

        match (req.volume, layout.panel_for(SeriesRole::Volume)) {
            (Some(volume), Some(panel)) => layers.push(Layer {
                name: "Volume".into(),
                panel,
                role: SeriesRole::Volume,
                kind: LayerKind::Bars {
                    x: volume.timestamps().to_vec(),
                    y: volume.values().to_vec(),
                    color: self.theme.volume.clone(),
                    opacity: self.theme.volume_opacity,
                },
            }),
            (Some(_), None) => debug!("volume supplied but layout has no volume panel; skipped"),
            (None, Some(_)) => debug!("layout has a volume panel but no volume series"),
            (None, None) => {}
        }

        let title = if layout.has_macd() {
            format!("{} with MACD", with_ticker(req.ticker, "Price"))
        } else {
            with_ticker(req.ticker, "Price")
        };

        debug!(
            layers = layers.len(),
            panels = layout.panel_count(),
            "composed chart"
        );

        Ok(RenderableFigure {
            title,
            width: FIGURE_WIDTH,
            height: FIGURE_HEIGHT,
            x_tick_format: X_TICK_FORMAT.to_string(),
            show_range_slider: false,
            layout: layout.clone().with_ticker(req.ticker),
            layers,
        })
    }

    fn price_layer(&self, req: &ChartRequest<'_>) -> Layer {
        if req.style.candlestick {
            Layer {
                name: with_ticker(req.ticker, "Price"),
                panel: 1,
                role: SeriesRole::Price,
                kind: LayerKind::Candlestick {
                    candles: req
                        .series
                        .iter()
                        .map(|b| Candle {
                            x: b.timestamp,
                            open: b.open,
                            high: b.high,
                            low: b.low,
                            close: b.close,
                        })
                        .collect(),
                },
            }
        } else {
            Layer {
                name: with_ticker(req.ticker, "Close Price"),
                panel: 1,
                role: SeriesRole::Price,
                kind: line_kind(
                    &req.series.close_series(),
                    LineStyle::solid(self.theme.close_line.clone()),
                ),
            }
        }
    }

    /// One marker group per canonical action, grouped by raw label.
    fn marker_layers(&self, trades: &[TradeEvent]) -> Vec<Layer> {
        let unmarked = trades.iter().filter(|t| !t.action.is_canonical()).count();
        if unmarked > 0 {
            debug!(unmarked, "trades with non-canonical actions get no marker");
        }

        TradeAction::CANONICAL
            .iter()
            .filter_map(|action| {
                let markers: Vec<TradeMarker> = trades
                    .iter()
                    .filter(|t| &t.action == action)
                    .map(|t| TradeMarker {
                        x: t.timestamp,
                        price: t.price,
                        total: t.total,
                        result: t.result,
                    })
                    .collect();
                if markers.is_empty() {
                    return None;
                }
                let (symbol, color) = match action.side() {
                    TradeSide::Buy => (MarkerSymbol::TriangleUp, &self.theme.buy),
                    _ => (MarkerSymbol::TriangleDown, &self.theme.sell),
                };
                Some(Layer {
                    name: action.label().to_string(),
                    panel: 1,
                    role: SeriesRole::TradeMarkers,
                    kind: LayerKind::Markers {
                        markers,
                        symbol,
                        color: color.clone(),
                        size: self.theme.marker_size,
                    },
                })
            })
            .collect()
    }

    fn macd_layers(&self, macd: &MacdResult, macd_panel: usize, hist_panel: usize) -> [Layer; 3] {
        let width = Some(self.theme.indicator_line_width);
        [
            Layer {
                name: "Fast MACD Line".into(),
                panel: macd_panel,
                role: SeriesRole::MacdLine,
                kind: line_kind(
                    macd.fast_line(),
                    LineStyle {
                        dash: Dash::Dash,
                        color: Some(self.theme.macd_line.clone()),
                        width,
                    },
                ),
            },
            Layer {
                name: "Slow Signal Line".into(),
                panel: macd_panel,
                role: SeriesRole::SignalLine,
                kind: line_kind(
                    macd.signal_line(),
                    LineStyle {
                        dash: Dash::Dot,
                        color: Some(self.theme.signal_line.clone()),
                        width,
                    },
                ),
            },
            Layer {
                name: "MACD Histogram".into(),
                panel: hist_panel,
                role: SeriesRole::Histogram,
                kind: LayerKind::Bars {
                    x: macd.histogram().timestamps().to_vec(),
                    y: macd.histogram().values().to_vec(),
                    color: self.theme.histogram.clone(),
                    opacity: 1.0,
                },
            },
        ]
    }
}

/// Compose with the default theme.
pub fn compose(req: &ChartRequest<'_>) -> Result<RenderableFigure> {
    ChartComposer::default().compose(req)
}

fn check_macd_consistency(req: &ChartRequest<'_>) -> Result<()> {
    match (req.layout.has_macd(), req.macd.is_some()) {
        (true, false) => Err(ChartError::invalid_parameter(
            "plot_macd requires both fast and slow series to be provided",
        )),
        (false, true) => Err(ChartError::invalid_parameter(
            "MACD series supplied but the layout has no MACD panel",
        )),
        _ => Ok(()),
    }
}

/// MACD and volume must sit on the price series' own time axis.
fn check_alignment(req: &ChartRequest<'_>) -> Result<()> {
    let columns = req
        .macd
        .map(|m| [m.fast_line(), m.signal_line(), m.histogram()])
        .into_iter()
        .flatten()
        .chain(req.volume);
    for column in columns {
        if !req.series.is_aligned_with(column) {
            return Err(ChartError::invalid_parameter(format!(
                "series '{}' ({} points) is not aligned with the price series ({} bars)",
                column.name(),
                column.len(),
                req.series.len()
            )));
        }
    }
    Ok(())
}

fn line_kind(series: &IndicatorSeries, style: LineStyle) -> LayerKind {
    LayerKind::Line {
        x: series.timestamps().to_vec(),
        y: series.values().to_vec(),
        style,
    }
}

fn with_ticker(ticker: &str, label: &str) -> String {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        label.to_string()
    } else {
        format!("{ticker} {label}")
    }
}
