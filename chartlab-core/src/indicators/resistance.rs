//! Resistance-level detection (not implemented).
//!
//! The interface is fixed so callers can be written against it, but every
//! call reports `ChartError::NotImplemented` instead of a guessed level.

use crate::error::{ChartError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceParams {
    /// Number of most recent bars to scan for highs.
    pub lookback: usize,
    /// Fractional tolerance for grouping similar highs (0.01 = 1%).
    pub tolerance: f64,
}

impl Default for ResistanceParams {
    fn default() -> Self {
        Self {
            lookback: 50,
            tolerance: 0.01,
        }
    }
}

/// Estimated resistance level from recent highs, `None` with too little data.
pub fn calculate_resistance(_highs: &[f64], _params: ResistanceParams) -> Result<Option<f64>> {
    Err(ChartError::NotImplemented("resistance detection"))
}
