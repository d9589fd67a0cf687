//! Panel layout planning.
//!
//! Feature flags → fixed panel table:
//!
//! | macd | volume | panels | heights                  |
//! |------|--------|--------|--------------------------|
//! | no   | no     | 1      | 1.0                      |
//! | no   | yes    | 2      | 0.65, 0.35               |
//! | yes  | no     | 3      | 0.60, 0.25, 0.15         |
//! | yes  | yes    | 4      | 4/7, 1/7, 1/7, 1/7       |
//!
//! The four-panel row keeps the 0.56 : 0.14 : 0.14 : 0.14 proportions,
//! rescaled so the heights sum to 1.
//! Price is always panel 1, MACD panel 2, histogram panel 3, volume last.
//! Panel indices are 1-based throughout.

use serde::Serialize;
use tracing::debug;

/// Spacing between stacked panels, as a fraction of figure height.
pub const VERTICAL_SPACING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Price,
    Macd,
    MacdHistogram,
    Volume,
}

impl PanelKind {
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Macd => "MACD",
            Self::MacdHistogram => "MACD Histogram",
            Self::Volume => "Volume",
        }
    }
}

/// Which data series a layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    Price,
    EmaOverlay,
    TradeMarkers,
    MacdLine,
    SignalLine,
    Histogram,
    Volume,
}

impl SeriesRole {
    /// Panel kind that hosts this role.
    pub fn panel_kind(self) -> PanelKind {
        match self {
            Self::Price | Self::EmaOverlay | Self::TradeMarkers => PanelKind::Price,
            Self::MacdLine | Self::SignalLine => PanelKind::Macd,
            Self::Histogram => PanelKind::MacdHistogram,
            Self::Volume => PanelKind::Volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    /// Relative height; all panels of a plan sum to 1.0.
    pub height: f64,
}

/// Immutable panel plan for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayoutPlan {
    panels: Vec<Panel>,
    vertical_spacing: f64,
}

impl ChartLayoutPlan {
    /// Plan panels for the requested features. Total: every flag pair is valid.
    pub fn plan(show_macd: bool, show_volume: bool) -> Self {
        use PanelKind::*;

        let rows: &[(PanelKind, f64)] = match (show_macd, show_volume) {
            (false, false) => &[(Price, 1.0)],
            (false, true) => &[(Price, 0.65), (Volume, 0.35)],
            (true, false) => &[(Price, 0.60), (Macd, 0.25), (MacdHistogram, 0.15)],
            (true, true) => &[
                (Price, 4.0 / 7.0),
                (Macd, 1.0 / 7.0),
                (MacdHistogram, 1.0 / 7.0),
                (Volume, 1.0 / 7.0),
            ],
        };

        let panels = rows
            .iter()
            .map(|&(kind, height)| Panel {
                kind,
                title: kind.default_title().to_string(),
                height,
            })
            .collect::<Vec<_>>();

        debug!(show_macd, show_volume, panels = panels.len(), "planned chart layout");
        Self {
            panels,
            vertical_spacing: VERTICAL_SPACING,
        }
    }

    /// Same plan with the price panel titled "{ticker} Price".
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        let ticker = ticker.trim();
        if !ticker.is_empty() {
            for panel in self.panels.iter_mut().filter(|p| p.kind == PanelKind::Price) {
                panel.title = format!("{ticker} {}", PanelKind::Price.default_title());
            }
        }
        self
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.panels.iter().map(|p| p.height).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }

    pub fn vertical_spacing(&self) -> f64 {
        self.vertical_spacing
    }

    /// 1-based index of the panel of `kind`, if the plan has one.
    pub fn panel_index(&self, kind: PanelKind) -> Option<usize> {
        self.panels
            .iter()
            .position(|p| p.kind == kind)
            .map(|i| i + 1)
    }

    /// 1-based index of the panel a series role renders in.
    pub fn panel_for(&self, role: SeriesRole) -> Option<usize> {
        self.panel_index(role.panel_kind())
    }

    pub fn has_macd(&self) -> bool {
        self.panel_index(PanelKind::Macd).is_some()
    }

    pub fn has_volume(&self) -> bool {
        self.panel_index(PanelKind::Volume).is_some()
    }
}

/// Planner entry point for callers that prefer a component value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartLayoutPlanner;

impl ChartLayoutPlanner {
    pub fn plan(&self, show_macd: bool, show_volume: bool) -> ChartLayoutPlan {
        ChartLayoutPlan::plan(show_macd, show_volume)
    }
}
