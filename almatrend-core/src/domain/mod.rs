//! Domain types shared by the indicator pipeline.

pub mod candle;

pub use candle::Candle;
