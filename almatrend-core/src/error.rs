//! Error type for the indicator pipeline.
//!
//! Two failure kinds, both surfaced as values — the core never logs, retries,
//! or emits partial results:
//! - `Configuration`: a parameter that can never produce output (non-positive
//!   length/window/sigma/factor, offset outside [0, 1]).
//! - `InsufficientHistory`: the caller supplied fewer bars than the operation
//!   needs. The caller decides whether to skip the symbol or retry on a later
//!   scan cycle.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("insufficient history: need {required} bars, have {available}")]
    InsufficientHistory { required: usize, available: usize },
}
