//! ALMA — Arnaud Legoux Moving Average.
//!
//! Gaussian-weighted moving average matching Pine `ta.alma`:
//!   m = offset * (length - 1)
//!   s = length / sigma
//!   w_k = exp(-(k - m)^2 / (2 * s^2)), k = 0..length-1
//!   ALMA[i] = Σ_k w_k * close[i - (length-1-k)] / Σ_k w_k
//!
//! k = length-1 aligns with the newest sample, k = 0 with the oldest.
//! The kernel depends only on the parameters, so it is computed once at
//! construction and reused across the series.
//!
//! Lookback: length - 1 (first valid value at index length-1).

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::error::IndicatorError;
use crate::indicators::Indicator;

/// ALMA kernel parameters.
///
/// Fields omitted when deserializing fall back to the production defaults,
/// so a config file can override just one of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlmaParams {
    pub length: usize,
    pub offset: f64,
    pub sigma: f64,
}

impl Default for AlmaParams {
    /// Production defaults used by the symbol scanner.
    fn default() -> Self {
        Self {
            length: 5,
            offset: 0.85,
            sigma: 2.75,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alma {
    params: AlmaParams,
    weights: Vec<f64>,
    weight_sum: f64,
    name: String,
}

impl Alma {
    pub fn new(params: AlmaParams) -> Result<Self, IndicatorError> {
        if params.length < 1 {
            return Err(IndicatorError::Configuration(
                "alma length must be >= 1".into(),
            ));
        }
        if !(params.sigma > 0.0) {
            return Err(IndicatorError::Configuration(
                "alma sigma must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&params.offset) {
            return Err(IndicatorError::Configuration(
                "alma offset must be in [0, 1]".into(),
            ));
        }

        let m = params.offset * (params.length - 1) as f64;
        let s = params.length as f64 / params.sigma;
        let weights: Vec<f64> = (0..params.length)
            .map(|k| {
                let d = k as f64 - m;
                (-(d * d) / (2.0 * s * s)).exp()
            })
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        let name = format!(
            "alma_{}_{}_{}",
            params.length, params.offset, params.sigma
        );
        Ok(Self {
            params,
            weights,
            weight_sum,
            name,
        })
    }

    pub fn params(&self) -> &AlmaParams {
        &self.params
    }

    /// Compute the filter over a raw close series.
    ///
    /// `None` for indices with fewer than `length - 1` prior samples, and
    /// wherever the window contains a NaN close.
    pub fn compute_series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let length = self.params.length;
        let mut result = vec![None; n];

        if n < length {
            return result;
        }

        for i in (length - 1)..n {
            let window = &closes[(i + 1 - length)..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }

            // k = length-1 hits closes[i], k = 0 hits closes[i-length+1].
            let mut acc = 0.0;
            for (k, &w) in self.weights.iter().enumerate() {
                acc += w * window[k];
            }
            result[i] = Some(acc / self.weight_sum);
        }

        result
    }
}

impl Indicator for Alma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.params.length.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<Option<f64>> {
        let closes = crate::domain::candle::closes(candles);
        self.compute_series(&closes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    fn alma(length: usize, offset: f64, sigma: f64) -> Alma {
        Alma::new(AlmaParams {
            length,
            offset,
            sigma,
        })
        .unwrap()
    }

    #[test]
    fn alma_3_known_values() {
        // length=3, offset=0.85, sigma=6 => m=1.7, s=0.5
        // weights: [exp(-5.78), exp(-0.98), exp(-0.18)]
        let a = alma(3, 0.85, 6.0);
        let result = a.compute_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_approx(result[2].unwrap(), 11.685673600238262, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.685673600238264, DEFAULT_EPSILON);
        assert_approx(result[4].unwrap(), 13.685673600238262, DEFAULT_EPSILON);
    }

    #[test]
    fn alma_constant_series_is_constant() {
        // Weights are normalized, so a constant input passes through exactly.
        let a = alma(5, 0.85, 2.75);
        let result = a.compute_series(&[100.0; 8]);
        for i in 0..4 {
            assert_eq!(result[i], None, "expected warmup at index {i}");
        }
        for i in 4..8 {
            assert_eq!(result[i], Some(100.0));
        }
    }

    #[test]
    fn alma_1_is_close() {
        let a = alma(1, 0.85, 2.75);
        let result = a.compute_series(&[100.0, 200.0, 300.0]);
        assert_approx(result[0].unwrap(), 100.0, DEFAULT_EPSILON);
        assert_approx(result[1].unwrap(), 200.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn alma_weights_favor_newest_sample() {
        // offset=0.85 shifts the Gaussian peak toward the newest sample, so
        // on a rising series ALMA sits above the plain mean of the window.
        let a = alma(5, 0.85, 2.75);
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0];
        let result = a.compute_series(&closes);
        let mean = closes.iter().sum::<f64>() / 5.0;
        assert!(result[4].unwrap() > mean);
    }

    #[test]
    fn alma_nan_window_is_undefined() {
        let a = alma(3, 0.85, 6.0);
        let result = a.compute_series(&[10.0, f64::NAN, 12.0, 13.0, 14.0]);
        assert_eq!(result[2], None); // window [10, NaN, 12]
        assert_eq!(result[3], None); // window [NaN, 12, 13]
        assert!(result[4].is_some()); // window [12, 13, 14]
    }

    #[test]
    fn alma_too_few_bars() {
        let a = alma(5, 0.85, 2.75);
        let result = a.compute_series(&[10.0, 11.0]);
        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn alma_lookback() {
        assert_eq!(alma(5, 0.85, 2.75).lookback(), 4);
        assert_eq!(alma(1, 0.85, 2.75).lookback(), 0);
    }

    #[test]
    fn alma_trait_reads_closes_only() {
        // high/low are carried for API compatibility but never read.
        let a = alma(3, 0.85, 6.0);
        let mut candles = make_candles(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        for c in &mut candles {
            c.high = 1e9;
            c.low = -1e9;
        }
        let from_candles = a.compute(&candles);
        let from_closes = a.compute_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(from_candles, from_closes);
    }

    #[test]
    fn alma_rejects_zero_length() {
        let err = Alma::new(AlmaParams {
            length: 0,
            offset: 0.85,
            sigma: 2.75,
        })
        .unwrap_err();
        assert!(matches!(err, IndicatorError::Configuration(_)));
    }

    #[test]
    fn alma_rejects_non_positive_sigma() {
        let err = Alma::new(AlmaParams {
            length: 5,
            offset: 0.85,
            sigma: 0.0,
        })
        .unwrap_err();
        assert!(matches!(err, IndicatorError::Configuration(_)));
    }

    #[test]
    fn alma_rejects_out_of_range_offset() {
        let err = Alma::new(AlmaParams {
            length: 5,
            offset: 1.5,
            sigma: 2.75,
        })
        .unwrap_err();
        assert!(matches!(err, IndicatorError::Configuration(_)));
    }

    #[test]
    fn alma_params_serde_round_trip() {
        let params = AlmaParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: AlmaParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn alma_params_partial_deserialize_fills_defaults() {
        let params: AlmaParams = serde_json::from_str(r#"{"length": 9}"#).unwrap();
        assert_eq!(params.length, 9);
        assert_eq!(params.offset, 0.85);
        assert_eq!(params.sigma, 2.75);

        let params: AlmaParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, AlmaParams::default());
    }

    #[test]
    fn alma_name_encodes_params() {
        assert_eq!(alma(5, 0.85, 2.75).name(), "alma_5_0.85_2.75");
    }
}
