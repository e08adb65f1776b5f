//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::{Candle, EmaIndicator};

/// EMA series with smoothing factor `2 / (span + 1)`, seeded by the first value.
///
/// The output has the same length as the input.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    math::smooth(values, math::span_alpha(span))
}

/// Calculate the EMA of closes at the latest bar
pub fn calculate_ema(candles: &[Candle], period: u32) -> Option<EmaIndicator> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let value = *ema(&closes, period as usize).last()?;

    Some(EmaIndicator { value, period })
}
