//! Candle — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV candle for a single symbol on a single bar.
///
/// The indicator pipeline reads only `close`; high/low are carried so the
/// same candle feed can serve range-based indicators without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// Returns true if any price field is NaN (void candle, e.g. a gap bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high is the ceiling, low is the floor,
    /// prices are positive.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Extract the close series from a candle slice, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn sane_candle() {
        assert!(candle(100.0, 105.0, 95.0, 102.0).is_sane());
    }

    #[test]
    fn high_below_low_is_insane() {
        assert!(!candle(100.0, 95.0, 105.0, 102.0).is_sane());
    }

    #[test]
    fn void_candle_detected() {
        let c = candle(100.0, 105.0, 95.0, f64::NAN);
        assert!(c.is_void());
        assert!(!c.is_sane());
    }

    #[test]
    fn closes_preserves_order() {
        let candles = vec![
            candle(1.0, 2.0, 0.5, 1.5),
            candle(1.5, 3.0, 1.0, 2.5),
            candle(2.5, 4.0, 2.0, 3.5),
        ];
        assert_eq!(closes(&candles), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn serde_round_trip() {
        let c = candle(100.0, 105.0, 95.0, 102.0);
        let json = serde_json::to_string(&c).unwrap();
        let back: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.close, c.close);
        assert_eq!(back.date, c.date);
    }
}
