//! Chart planning and composition.
//!
//! - [`layout`]: panel table for the requested features
//! - [`composer`]: turns series, trades and a plan into layers
//! - [`figure`]: the serializable output handed to a renderer
//! - [`theme`]: colors and marker sizes

pub mod composer;
pub mod figure;
pub mod layout;
pub mod theme;

pub use composer::{compose, ChartComposer, ChartRequest, ChartStyle};
pub use figure::{
    Candle, Dash, Layer, LayerKind, LineStyle, MarkerSymbol, RenderableFigure, TradeMarker,
};
pub use layout::{ChartLayoutPlan, ChartLayoutPlanner, Panel, PanelKind, SeriesRole};
pub use theme::Theme;
