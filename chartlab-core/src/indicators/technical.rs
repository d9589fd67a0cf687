//! Stateful indicator context over a price table.
//!
//! Offers the two-step MACD API (fast line first, then signal) next to the
//! single-call `macd`. The step ordering is an explicit state machine:
//!
//! ```text
//! Empty --macd_fast_line / macd--> HasMacd
//! HasMacd --macd_fast_line / macd--> HasMacd (fast line replaced)
//! ```
//!
//! `macd_signal` is only legal in `HasMacd`.

use super::ema::ema_of;
use super::macd::{macd_fast_line, macd_signal_line, MacdParams, MacdResult};
use super::resistance::{calculate_resistance, ResistanceParams};
use crate::data::PriceTable;
use crate::domain::{IndicatorSeries, PriceSeries};
use crate::error::{ChartError, Result};

#[derive(Debug, Clone, PartialEq)]
enum MacdState {
    Empty,
    HasMacd {
        fast_line: IndicatorSeries,
        signal_line: Option<IndicatorSeries>,
    },
}

#[derive(Debug, Clone)]
pub struct TechnicalIndicators {
    table: PriceTable,
    close: IndicatorSeries,
    state: MacdState,
}

impl TechnicalIndicators {
    /// Build a context. The table must carry a `close` column.
    pub fn new(table: PriceTable) -> Result<Self> {
        if !table.has_column("close") {
            return Err(ChartError::invalid_parameter(
                "price data must contain a 'close' column",
            ));
        }
        let close = table.series("close")?;
        Ok(Self {
            table,
            close,
            state: MacdState::Empty,
        })
    }

    pub fn from_series(series: &PriceSeries) -> Result<Self> {
        Self::new(PriceTable::from(series))
    }

    pub fn close(&self) -> &IndicatorSeries {
        &self.close
    }

    pub fn ema(&self, span: usize) -> Result<IndicatorSeries> {
        ema_of(&self.close, span, format!("EMA_{span}"))
    }

    /// Compute and remember the MACD fast line. Any earlier signal line is discarded.
    pub fn macd_fast_line(&mut self, short_span: usize, long_span: usize) -> Result<IndicatorSeries> {
        let fast_line = macd_fast_line(&self.close, short_span, long_span)?;
        self.state = MacdState::HasMacd {
            fast_line: fast_line.clone(),
            signal_line: None,
        };
        Ok(fast_line)
    }

    /// Signal line from the remembered fast line.
    pub fn macd_signal(&mut self, signal_span: usize) -> Result<IndicatorSeries> {
        match &mut self.state {
            MacdState::Empty => Err(ChartError::InvalidState(
                "MACD must be calculated before the signal line".into(),
            )),
            MacdState::HasMacd {
                fast_line,
                signal_line,
            } => {
                let signal = macd_signal_line(fast_line, signal_span)?;
                *signal_line = Some(signal.clone());
                Ok(signal)
            }
        }
    }

    /// Fast line, signal and histogram in one call.
    pub fn macd(&mut self, params: MacdParams) -> Result<MacdResult> {
        params.validate()?;
        self.macd_fast_line(params.fast, params.slow)?;
        self.macd_signal(params.signal)?;
        self.macd_result()
    }

    pub fn fast_line(&self) -> Option<&IndicatorSeries> {
        match &self.state {
            MacdState::HasMacd { fast_line, .. } => Some(fast_line),
            MacdState::Empty => None,
        }
    }

    pub fn signal_line(&self) -> Option<&IndicatorSeries> {
        match &self.state {
            MacdState::HasMacd { signal_line, .. } => signal_line.as_ref(),
            MacdState::Empty => None,
        }
    }

    /// Current fast and signal lines as a `MacdResult`.
    pub fn macd_result(&self) -> Result<MacdResult> {
        MacdResult::from_lines(self.fast_line().cloned(), self.signal_line().cloned())
    }

    /// Resistance from the `high` column. Not implemented yet.
    pub fn calculate_resistance(&self, params: ResistanceParams) -> Result<Option<f64>> {
        let highs = self.table.column("high").ok_or_else(|| {
            ChartError::invalid_parameter("price data must contain a 'high' column")
        })?;
        calculate_resistance(highs, params)
    }
}
