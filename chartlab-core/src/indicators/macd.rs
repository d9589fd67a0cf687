//! Moving Average Convergence Divergence (MACD).
//!
//! fast line = EMA(close, fast) - EMA(close, slow)
//! signal    = EMA(fast line, signal)
//! histogram = fast line - signal
//!
//! Any positive spans are accepted, including fast >= slow, which yields a
//! degenerate but well-defined MACD.

use super::ema::{ema_of, validate_span};
use crate::domain::{IndicatorSeries, PriceSeries};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

pub const FAST_LINE_NAME: &str = "macd";
pub const SIGNAL_LINE_NAME: &str = "macd_signal";
pub const HISTOGRAM_NAME: &str = "macd_histogram";

/// MACD spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    pub fn validate(&self) -> Result<()> {
        validate_span("MACD fast", self.fast)?;
        validate_span("MACD slow", self.slow)?;
        validate_span("MACD signal", self.signal)
    }
}

/// Fast line, signal line and histogram, all on the source index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdResult {
    fast_line: IndicatorSeries,
    signal_line: IndicatorSeries,
    histogram: IndicatorSeries,
}

impl MacdResult {
    /// Assemble a MACD from separately supplied lines.
    ///
    /// Both lines are required; the histogram is derived from them.
    pub fn from_lines(
        fast_line: Option<IndicatorSeries>,
        signal_line: Option<IndicatorSeries>,
    ) -> Result<Self> {
        match (fast_line, signal_line) {
            (Some(fast), Some(signal)) => {
                let histogram = fast.sub(&signal, HISTOGRAM_NAME)?;
                Ok(Self {
                    fast_line: fast,
                    signal_line: signal,
                    histogram,
                })
            }
            (fast, signal) => Err(ChartError::invalid_parameter(format!(
                "plot_macd requires both fast and slow series to be provided \
                 (fast line: {}, signal line: {})",
                presence(fast.is_some()),
                presence(signal.is_some()),
            ))),
        }
    }

    /// Derive signal and histogram from an already computed fast line.
    pub(crate) fn from_fast_line(fast_line: IndicatorSeries, signal_span: usize) -> Result<Self> {
        let signal_line = macd_signal_line(&fast_line, signal_span)?;
        Self::from_lines(Some(fast_line), Some(signal_line))
    }

    pub fn fast_line(&self) -> &IndicatorSeries {
        &self.fast_line
    }

    pub fn signal_line(&self) -> &IndicatorSeries {
        &self.signal_line
    }

    pub fn histogram(&self) -> &IndicatorSeries {
        &self.histogram
    }

    pub fn len(&self) -> usize {
        self.fast_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast_line.is_empty()
    }
}

fn presence(present: bool) -> &'static str {
    if present {
        "provided"
    } else {
        "missing"
    }
}

/// EMA(close, fast) - EMA(close, slow).
pub fn macd_fast_line(close: &IndicatorSeries, fast: usize, slow: usize) -> Result<IndicatorSeries> {
    let fast_ema = ema_of(close, fast, format!("EMA_{fast}"))?;
    let slow_ema = ema_of(close, slow, format!("EMA_{slow}"))?;
    fast_ema.sub(&slow_ema, FAST_LINE_NAME)
}

/// EMA of the fast line itself.
pub fn macd_signal_line(fast_line: &IndicatorSeries, signal: usize) -> Result<IndicatorSeries> {
    ema_of(fast_line, signal, SIGNAL_LINE_NAME)
}

/// Single-call MACD over the close prices of `series`.
pub fn compute_macd(
    series: &PriceSeries,
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdResult> {
    Macd::new(MacdParams::new(fast, slow, signal))?.compute(series)
}

#[derive(Debug, Clone)]
pub struct Macd {
    params: MacdParams,
}

impl Macd {
    pub fn new(params: MacdParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> MacdParams {
        self.params
    }

    pub fn compute(&self, series: &PriceSeries) -> Result<MacdResult> {
        let fast_line = macd_fast_line(&series.close_series(), self.params.fast, self.params.slow)?;
        MacdResult::from_fast_line(fast_line, self.params.signal)
    }
}
