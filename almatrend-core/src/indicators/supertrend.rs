//! ALMA Supertrend — band/direction recurrence over ALMA ± factor × stdev.
//!
//! Port of the "Alma SD SuperTrend" Pine (v6) indicator:
//! - basic bands: alma ± factor * stdev
//! - ratchet update: a band only moves toward price unless the previous
//!   close already broke through the previous band
//! - direction flips on close breaking the active band; the active band is
//!   identified by exact float equality with the previous trend line
//!
//! Inherently sequential/stateful: the value at bar i reads band state at
//! bar i-1 and nothing later. The whole series is recomputed from the full
//! window on every call; no state survives across calls.
//!
//! Lookback: max(alma lookback, stdev lookback).

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::error::IndicatorError;
use crate::indicators::alma::{Alma, AlmaParams};
use crate::indicators::stdev::RollingStdev;
use crate::indicators::{first_defined, Indicator};

/// Which band the trend line is riding.
///
/// `Up` selects the upper band (price trading below the line), `Down`
/// selects the lower band (price trading above it). Matches the Pine
/// direction values +1 and -1 respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// Pine-compatible numeric value: Up = +1, Down = -1.
    pub fn value(self) -> i8 {
        match self {
            TrendDirection::Up => 1,
            TrendDirection::Down => -1,
        }
    }
}

/// Full band state per bar. All four series share the same warmup: every
/// index before the later of the two leaf indicators' first defined index
/// is `None`.
#[derive(Debug, Clone, Default)]
pub struct BandSeries {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub direction: Vec<Option<TrendDirection>>,
    pub trend_line: Vec<Option<f64>>,
}

impl BandSeries {
    fn undefined(n: usize) -> Self {
        Self {
            upper: vec![None; n],
            lower: vec![None; n],
            direction: vec![None; n],
            trend_line: vec![None; n],
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlmaSupertrend {
    alma: Alma,
    stdev: RollingStdev,
    factor: f64,
    name: String,
}

impl AlmaSupertrend {
    pub fn new(
        params: AlmaParams,
        stdev_window: usize,
        factor: f64,
    ) -> Result<Self, IndicatorError> {
        if !(factor > 0.0) {
            return Err(IndicatorError::Configuration(
                "band factor must be > 0".into(),
            ));
        }
        let alma = Alma::new(params)?;
        let stdev = RollingStdev::new(stdev_window)?;
        let name = format!(
            "alma_supertrend_{}_{}_{}",
            params.length, stdev_window, factor
        );
        Ok(Self {
            alma,
            stdev,
            factor,
            name,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Run the band/direction recurrence over a raw close series.
    ///
    /// Processes bars strictly in increasing time order; the state at bar i
    /// reads only bars < i. If either leaf indicator never becomes defined
    /// (series shorter than its window), every output is `None`.
    pub fn compute_bands(&self, closes: &[f64]) -> BandSeries {
        let n = closes.len();
        let alma = self.alma.compute_series(closes);
        let sd = self.stdev.compute_series(closes);

        let (Some(alma_start), Some(sd_start)) = (first_defined(&alma), first_defined(&sd))
        else {
            return BandSeries::undefined(n);
        };
        let start = alma_start.max(sd_start);

        let mut out = BandSeries::undefined(n);

        for i in start..n {
            let (Some(mean), Some(dev)) = (alma[i], sd[i]) else {
                continue;
            };

            let ub_basic = mean + self.factor * dev;
            let lb_basic = mean - self.factor * dev;

            // Self-seeding: on the first bar (and after any gap in the leaf
            // series) the previous band is the basic band, never zero.
            let prev_upper = if i > start {
                out.upper[i - 1].unwrap_or(ub_basic)
            } else {
                ub_basic
            };
            let prev_lower = if i > start {
                out.lower[i - 1].unwrap_or(lb_basic)
            } else {
                lb_basic
            };
            let prev_close = if i > 0 { Some(closes[i - 1]) } else { None };

            // Ratchet: the upper band only drops (tightens toward price)
            // unless the previous close already broke above it; mirror rule
            // for the lower band.
            let upper = if ub_basic < prev_upper || prev_close.is_some_and(|c| c > prev_upper) {
                ub_basic
            } else {
                prev_upper
            };
            let lower = if lb_basic > prev_lower || prev_close.is_some_and(|c| c < prev_lower) {
                lb_basic
            } else {
                prev_lower
            };
            out.upper[i] = Some(upper);
            out.lower[i] = Some(lower);

            let direction = if i == start || sd[i - 1].is_none() {
                TrendDirection::Up
            } else {
                match (out.trend_line[i - 1], out.upper[i - 1]) {
                    // Exact equality is deliberate: "trend line == upper
                    // band" is a discrete state carried through the floating
                    // representation, not a numeric coincidence. Any
                    // tolerance here desynchronizes every later bar.
                    (Some(prev_line), Some(prev_upper_band)) if prev_line == prev_upper_band => {
                        if closes[i] > upper {
                            TrendDirection::Down
                        } else {
                            TrendDirection::Up
                        }
                    }
                    _ => {
                        if closes[i] < lower {
                            TrendDirection::Up
                        } else {
                            TrendDirection::Down
                        }
                    }
                }
            };
            out.direction[i] = Some(direction);
            out.trend_line[i] = Some(match direction {
                TrendDirection::Up => upper,
                TrendDirection::Down => lower,
            });
        }

        out
    }
}

impl Indicator for AlmaSupertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.alma.lookback().max(self.stdev.lookback())
    }

    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let closes = crate::domain::candle::closes(candles);
        self.compute_bands(&closes).trend_line
    }
}

/// Compute the ALMA Supertrend line for a close series.
///
/// This is the primary entry point for the trading-decision layer. Returns
/// `Err(Configuration)` for parameters that can never produce output; a
/// series shorter than the required lookback is not an error and yields an
/// all-`None` result instead.
pub fn compute_trend_line(
    closes: &[f64],
    params: AlmaParams,
    stdev_window: usize,
    factor: f64,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    let supertrend = AlmaSupertrend::new(params, stdev_window, factor)?;
    Ok(supertrend.compute_bands(closes).trend_line)
}
