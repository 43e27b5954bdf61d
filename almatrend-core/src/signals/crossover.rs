//! Trend-line crossover classifier.
//!
//! Inspects the last three bars of the trend line against the close series
//! and emits one discrete signal. Crossings are evaluated on the two
//! completed bars before the most recent one (`t-1` and `t-2`), so a signal
//! only fires once the crossing bar has closed:
//! - Long cross: trend line moved from above the close to below it
//! - Short cross: trend line moved from below the close to above it
//! - Bull/bear trend: no crossing, price stays on one side of the line

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

/// Discrete trading signal, first match wins in the order listed.
///
/// The serde representation uses the labels the bot persists and logs
/// (`LONG_CROSS`, `BULL`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    LongCross,
    ShortCross,
    Bull,
    Bear,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::LongCross => "LONG_CROSS",
            Signal::ShortCross => "SHORT_CROSS",
            Signal::Bull => "BULL",
            Signal::Bear => "BEAR",
            Signal::Neutral => "NEUTRAL",
        };
        f.write_str(label)
    }
}

/// Number of trailing values that are defined (`Some` and non-NaN), capped
/// at `need`.
fn defined_tail(trend_line: &[Option<f64>], closes: &[f64], need: usize) -> usize {
    let tl = trend_line
        .iter()
        .rev()
        .take(need)
        .take_while(|v| v.is_some_and(|x| !x.is_nan()))
        .count();
    let cl = closes
        .iter()
        .rev()
        .take(need)
        .take_while(|v| !v.is_nan())
        .count();
    tl.min(cl)
}

/// Classify the current bar from the trend line and close series.
///
/// Both series are read from their trailing end and must carry at least
/// three defined values (`t`, `t-1`, `t-2`); otherwise
/// `Err(InsufficientHistory)` is returned. Exactly one signal is emitted
/// per call, with precedence LongCross > ShortCross > Bull > Bear > Neutral.
pub fn classify(trend_line: &[Option<f64>], closes: &[f64]) -> Result<Signal, IndicatorError> {
    let available = defined_tail(trend_line, closes, 3);
    if available < 3 {
        return Err(IndicatorError::InsufficientHistory {
            required: 3,
            available,
        });
    }

    let n = trend_line.len();
    let m = closes.len();
    // Guaranteed Some by defined_tail.
    let tl1 = trend_line[n - 2].unwrap();
    let tl2 = trend_line[n - 3].unwrap();
    let c1 = closes[m - 2];
    let c2 = closes[m - 3];

    let long_cross = tl2 > c2 && tl1 < c1;
    let short_cross = tl2 < c2 && tl1 > c1;
    let bull_trend = tl1 < c1 && tl2 < c2;
    // The second clause reads the newer close (c1), not c2 — this matches
    // the deployed scanner and downstream trading logic depends on it.
    // TODO: confirm against the Pine source whether this should read c2.
    let bear_trend = tl1 > c1 && tl2 > c1;

    let signal = if long_cross {
        Signal::LongCross
    } else if short_cross {
        Signal::ShortCross
    } else if bull_trend {
        Signal::Bull
    } else if bear_trend {
        Signal::Bear
    } else {
        Signal::Neutral
    };
    Ok(signal)
}
