//! Chart configuration, stored as TOML.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! ticker = "AAPL"
//! candlestick = true
//! ema_periods = [13, 26]
//! show_volume = true
//! excluded_actions = ["Deposit"]
//!
//! [macd]
//! fast = 12
//! slow = 26
//! signal = 9
//!
//! [theme]
//! buy = "lime"
//! ```

use crate::chart::{ChartStyle, Theme};
use crate::error::Result;
use crate::indicators::MacdParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub ticker: String,
    pub candlestick: bool,
    pub ema_periods: Vec<usize>,
    /// MACD panels are drawn only when this is set.
    pub macd: Option<MacdParams>,
    pub show_volume: bool,
    /// Raw action labels dropped before plotting.
    pub excluded_actions: Vec<String>,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            ticker: String::new(),
            candlestick: true,
            ema_periods: vec![13, 26],
            macd: None,
            show_volume: false,
            excluded_actions: Vec::new(),
            theme: Theme::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject spans that would fail later in the indicator engine.
    pub fn validate(&self) -> Result<()> {
        for &span in &self.ema_periods {
            crate::indicators::ema::validate_span("EMA", span)?;
        }
        if let Some(params) = &self.macd {
            params.validate()?;
        }
        Ok(())
    }

    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            candlestick: self.candlestick,
        }
    }
}
