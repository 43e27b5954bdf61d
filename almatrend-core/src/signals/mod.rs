//! Signal classification — turning the trend line into discrete signals.
//!
//! Signals are pure market-timing classifications over completed bars; they
//! never look at portfolio state, and they are deterministic for the same
//! trend-line/close inputs.

pub mod crossover;

pub use crossover::{classify, Signal};
