//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1)
//! Seed: EMA[0] = x[0]. Defined at every index, no warmup.

use super::indicator::Indicator;
use crate::domain::{IndicatorSeries, PriceSeries};
use crate::error::{ChartError, Result};

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Result<Self> {
        validate_span("EMA", span)?;
        Ok(Self {
            span,
            name: format!("EMA_{span}"),
        })
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorSeries> {
        ema_of(&series.close_series(), self.span, self.name.clone())
    }
}

/// EMA of the close prices of `series`.
pub fn compute_ema(series: &PriceSeries, span: usize) -> Result<IndicatorSeries> {
    Ema::new(span)?.compute(series)
}

/// EMA of an arbitrary aligned series, e.g. the MACD signal line.
pub fn ema_of(
    input: &IndicatorSeries,
    span: usize,
    name: impl Into<String>,
) -> Result<IndicatorSeries> {
    validate_span("EMA", span)?;
    let name = name.into();
    if input.is_empty() {
        return Err(ChartError::invalid_parameter(format!(
            "cannot compute {name} on an empty series"
        )));
    }
    Ok(input.map_values(name, |values| ema_of_series(values, span)))
}

/// Compute raw EMA values from a pre-extracted f64 slice.
///
/// The caller guarantees `span >= 1`. NaN inputs propagate to every later value.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    debug_assert!(span >= 1);
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    let mut iter = values.iter().copied();
    let Some(seed) = iter.next() else {
        return result;
    };
    result.push(seed);

    let mut prev = seed;
    for v in iter {
        let ema = alpha * v + (1.0 - alpha) * prev;
        result.push(ema);
        prev = ema;
    }

    result
}

pub(crate) fn validate_span(what: &str, span: usize) -> Result<()> {
    if span < 1 {
        return Err(ChartError::invalid_parameter(format!(
            "{what} span must be >= 1, got {span}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::make_series;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_span_1_equals_close() {
        let series = make_series(&[100.0, 200.0, 300.0]);
        let result = compute_ema(&series, 1).unwrap();
        assert_eq!(result.values(), &[100.0, 200.0, 300.0]);
    }

    #[test]
    fn ema_3_known_values() {
        // Closes: 10, 11, 12, 13
        // alpha = 2/(3+1) = 0.5, seed = 10
        // EMA[1] = 0.5*11 + 0.5*10 = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        // EMA[3] = 0.5*13 + 0.5*11.25 = 12.125
        let series = make_series(&[10.0, 11.0, 12.0, 13.0]);
        let result = compute_ema(&series, 3).unwrap();

        assert_eq!(result.name(), "EMA_3");
        assert_approx(result.values()[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result.values()[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result.values()[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result.values()[3], 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_is_aligned_with_source() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = compute_ema(&series, 4).unwrap();
        assert_eq!(result.len(), series.len());
        assert_eq!(result.timestamps(), series.timestamps().as_slice());
        assert!(result.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn ema_rejects_zero_span() {
        let series = make_series(&[1.0, 2.0]);
        let err = compute_ema(&series, 0).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
        assert!(err.to_string().contains("span must be >= 1"));
    }

    #[test]
    fn ema_rejects_empty_series() {
        let series = PriceSeries::new(Vec::new()).unwrap();
        let err = compute_ema(&series, 3).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
        assert!(err.to_string().contains("empty series"));
    }

    #[test]
    fn ema_of_series_matches_indicator() {
        let series = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let indicator_result = compute_ema(&series, 3).unwrap();
        let raw = ema_of_series(&series.closes(), 3);
        for (a, b) in indicator_result.values().iter().zip(&raw) {
            assert_approx(*a, *b, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn nan_propagates() {
        let values = ema_of_series(&[1.0, f64::NAN, 3.0], 2);
        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
    }
}
