//! Momentum indicators: RSI, MACD

pub mod rsi;
pub mod macd;

pub use rsi::*;
pub use macd::*;
