//! Indicator implementations.
//!
//! - `Ema` / `compute_ema`: exponential moving average, seeded with the first value
//! - `Macd` / `compute_macd`: fast line, signal line and histogram
//! - `TechnicalIndicators`: stateful context with the two-step MACD API
//! - `calculate_resistance`: declared interface, reports not-implemented
//!
//! Every output series is aligned 1:1 with its input: same length, same
//! timestamps, no warmup NaNs.

pub mod ema;
pub mod indicator;
pub mod macd;
pub mod resistance;
pub mod technical;

pub use ema::{compute_ema, ema_of, ema_of_series, Ema};
pub use indicator::Indicator;
pub use macd::{compute_macd, macd_fast_line, macd_signal_line, Macd, MacdParams, MacdResult};
pub use resistance::{calculate_resistance, ResistanceParams};
pub use technical::TechnicalIndicators;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
