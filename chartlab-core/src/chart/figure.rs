//! Renderable figure: a passive description of layers and panels.
//!
//! Nothing here draws. A rendering collaborator consumes the value (usually
//! as JSON) and produces pixels.

use super::layout::{ChartLayoutPlan, SeriesRole};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableFigure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// strftime-style format for time-axis tick labels.
    pub x_tick_format: String,
    pub show_range_slider: bool,
    pub layout: ChartLayoutPlan,
    /// Layers in draw order (later layers on top).
    pub layers: Vec<Layer>,
}

impl RenderableFigure {
    /// Layers targeting a 1-based panel index, in draw order.
    pub fn layers_in(&self, panel: usize) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(move |l| l.panel == panel)
    }

    pub fn layers_with_role(&self, role: SeriesRole) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(move |l| l.role == role)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    /// Legend label.
    pub name: String,
    /// 1-based panel index.
    pub panel: usize,
    pub role: SeriesRole,
    #[serde(flatten)]
    pub kind: LayerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerKind {
    Candlestick {
        candles: Vec<Candle>,
    },
    Line {
        x: Vec<NaiveDateTime>,
        y: Vec<f64>,
        style: LineStyle,
    },
    Markers {
        markers: Vec<TradeMarker>,
        symbol: MarkerSymbol,
        color: String,
        size: u32,
    },
    Bars {
        x: Vec<NaiveDateTime>,
        y: Vec<f64>,
        color: String,
        opacity: f64,
    },
}

impl LayerKind {
    /// Number of points the layer draws.
    pub fn len(&self) -> usize {
        match self {
            Self::Candlestick { candles } => candles.len(),
            Self::Line { y, .. } | Self::Bars { y, .. } => y.len(),
            Self::Markers { markers, .. } => markers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub x: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub dash: Dash,
    pub color: Option<String>,
    pub width: Option<f64>,
}

impl LineStyle {
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            dash: Dash::Solid,
            color: Some(color.into()),
            width: None,
        }
    }

    /// Dashed line with the renderer's default color cycle.
    pub fn dashed() -> Self {
        Self {
            dash: Dash::Dash,
            color: None,
            width: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    TriangleUp,
    TriangleDown,
}

/// One trade marker with its tooltip data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeMarker {
    pub x: NaiveDateTime,
    /// Executed price; the marker's y position.
    pub price: f64,
    pub total: f64,
    pub result: Option<f64>,
}
