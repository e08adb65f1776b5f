//! Market structure indicators: break of structure

pub mod breakout;

pub use breakout::*;
