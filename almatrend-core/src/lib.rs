//! AlmaTrend Core — ALMA Supertrend indicator pipeline and signal classification.
//!
//! This crate contains the pure computational heart of the trading bot:
//! - Domain types (candles, indicator parameters)
//! - ALMA: Gaussian-weighted moving average (Pine `ta.alma` semantics)
//! - Rolling sample standard deviation (Pine `ta.stdev` semantics)
//! - Supertrend band/direction recurrence over ALMA ± factor × stdev
//! - Crossover classifier emitting discrete trading signals
//!
//! Everything here is a pure function of an input candle series plus
//! configuration: no I/O, no caches, no cross-call state. Callers supply the
//! full historical window on every invocation and get back fully computed
//! series. Warmup bars (insufficient history) are `None`, never a sentinel
//! number, so they cannot be mistaken for real values downstream.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod signals;

pub use error::IndicatorError;
pub use indicators::{compute_trend_line, Alma, AlmaSupertrend, RollingStdev};
pub use signals::{classify, Signal};
