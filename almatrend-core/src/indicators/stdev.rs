//! Rolling sample standard deviation.
//!
//! Matches Pine `ta.stdev` / pandas `rolling().std(ddof=1)`: the sum of
//! squared deviations over the trailing window is divided by `window - 1`,
//! not `window`.
//!
//! Each window is recomputed directly (two-pass mean then deviations) rather
//! than via sliding accumulators, so the output is a pure function of the
//! window contents with no accumulated rounding drift across the series.
//!
//! Lookback: window - 1 (first valid value at index window-1).

use crate::domain::Candle;
use crate::error::IndicatorError;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct RollingStdev {
    window: usize,
    name: String,
}

impl RollingStdev {
    pub fn new(window: usize) -> Result<Self, IndicatorError> {
        if window < 1 {
            return Err(IndicatorError::Configuration(
                "stdev window must be >= 1".into(),
            ));
        }
        Ok(Self {
            window,
            name: format!("stdev_{window}"),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Compute the rolling sample standard deviation over a raw close series.
    ///
    /// A window of 1 never produces a value: sample variance divides by
    /// `window - 1` and needs at least two observations.
    pub fn compute_series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let mut result = vec![None; n];

        if self.window < 2 || n < self.window {
            return result;
        }

        for i in (self.window - 1)..n {
            let window = &closes[(i + 1 - self.window)..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }

            let mean = window.iter().sum::<f64>() / self.window as f64;
            let sum_sq: f64 = window
                .iter()
                .map(|&v| {
                    let d = v - mean;
                    d * d
                })
                .sum();
            result[i] = Some((sum_sq / (self.window - 1) as f64).sqrt());
        }

        result
    }
}

impl Indicator for RollingStdev {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let closes = crate::domain::candle::closes(candles);
        self.compute_series(&closes)
    }
}
