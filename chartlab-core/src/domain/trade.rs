//! Trade log types: raw broker rows and classified trade events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a broker trade-log export, before any interpretation.
///
/// Field names follow the export's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTradeRecord {
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Price / share")]
    pub price: f64,
    #[serde(rename = "Total")]
    pub total: f64,
    #[serde(rename = "Result", default)]
    pub result: Option<f64>,
}

/// Raw action label of a trade.
///
/// The four canonical labels are matched case-sensitively; anything else is
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeAction {
    MarketBuy,
    MarketSell,
    LimitBuy,
    LimitSell,
    Other(String),
}

impl TradeAction {
    /// Canonical actions in marker-group order.
    pub const CANONICAL: [TradeAction; 4] = [
        TradeAction::MarketBuy,
        TradeAction::MarketSell,
        TradeAction::LimitBuy,
        TradeAction::LimitSell,
    ];

    pub fn parse(label: &str) -> Self {
        match label {
            "Market buy" => Self::MarketBuy,
            "Market sell" => Self::MarketSell,
            "Limit buy" => Self::LimitBuy,
            "Limit sell" => Self::LimitSell,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label as it appears in the trade log.
    pub fn label(&self) -> &str {
        match self {
            Self::MarketBuy => "Market buy",
            Self::MarketSell => "Market sell",
            Self::LimitBuy => "Limit buy",
            Self::LimitSell => "Limit sell",
            Self::Other(label) => label,
        }
    }

    pub fn side(&self) -> TradeSide {
        match self {
            Self::MarketBuy | Self::LimitBuy => TradeSide::Buy,
            Self::MarketSell | Self::LimitSell => TradeSide::Sell,
            Self::Other(_) => TradeSide::Unknown,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Binary side of a trade; `Unknown` for unrecognized actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    Unknown,
}

/// A classified trade from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub timestamp: NaiveDateTime,
    pub action: TradeAction,
    pub side: TradeSide,
    /// Executed price per share.
    pub price: f64,
    /// Total value of the transaction.
    pub total: f64,
    /// Realized result, if the broker reported one.
    pub result: Option<f64>,
}
