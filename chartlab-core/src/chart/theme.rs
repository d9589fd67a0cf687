//! Color and marker tokens for composed charts.
//!
//! Colors are CSS color strings so any renderer can consume them as-is.
//!
//! # Palette
//! - **Buy**: green (buy markers)
//! - **Sell**: red (sell markers)
//! - **Close line**: blue (line-mode price)
//! - **MACD line**: blue; **signal line**: red
//! - **Histogram**: black bars
//! - **Volume**: red bars at half opacity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub buy: String,
    pub sell: String,
    pub close_line: String,
    pub macd_line: String,
    pub signal_line: String,
    pub histogram: String,
    pub volume: String,
    pub volume_opacity: f64,
    pub marker_size: u32,
    pub indicator_line_width: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            buy: "green".into(),
            sell: "red".into(),
            close_line: "blue".into(),
            macd_line: "blue".into(),
            signal_line: "red".into(),
            histogram: "black".into(),
            volume: "red".into(),
            volume_opacity: 0.5,
            marker_size: 10,
            indicator_line_width: 2.0,
        }
    }
}
