//! Concrete indicator implementations.
//!
//! All indicators implement the `Indicator` trait and are pure functions:
//! candle history in, numeric series out. Warmup bars — indices with fewer
//! than `lookback()` prior samples — are `None`, never a sentinel number.
//!
//! The pipeline composes strictly forward in time:
//! `Alma` and `RollingStdev` are independent leaves; `AlmaSupertrend`
//! consumes both plus raw closes to run the band/direction recurrence.
//!
//! # Look-ahead contamination guard
//! No indicator value at bar t may depend on price data from bar t+1 or
//! later. Every indicator must pass the truncated-vs-full series test.

pub mod alma;
pub mod stdev;
pub mod supertrend;

pub use alma::{Alma, AlmaParams};
pub use stdev::RollingStdev;
pub use supertrend::{compute_trend_line, AlmaSupertrend, BandSeries, TrendDirection};

use crate::domain::Candle;

/// Trait for indicators.
///
/// Indicators take a full candle series and produce an output series of the
/// same length. The first `lookback()` values are `None` (warmup).
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "alma_5_0.85_2.75", "stdev_20").
    fn name(&self) -> &str;

    /// Number of bars consumed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire candle series.
    ///
    /// Returns a `Vec<Option<f64>>` of the same length as `candles`, with
    /// `None` at every index where insufficient history exists.
    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>>;
}

/// Index of the first defined value in a series, if any.
pub(crate) fn first_defined(series: &[Option<f64>]) -> Option<usize> {
    series.iter().position(|v| v.is_some())
}

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Candle {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

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
