//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::{Candle, RsiIndicator};

/// RSI series using Wilder smoothing (factor `1 / period`).
///
/// RSI = 100 - (100 / (1 + RS)), RS = smoothed gain / smoothed loss.
/// The first element has no price change behind it and is NaN.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let changes = math::diff(values);
    let gains: Vec<f64> = changes
        .iter()
        .map(|d| if d.is_nan() { f64::NAN } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = changes
        .iter()
        .map(|d| if d.is_nan() { f64::NAN } else { (-d).max(0.0) })
        .collect();

    let alpha = math::wilder_alpha(period);
    let avg_gain = math::smooth(&gains, alpha);
    let avg_loss = math::smooth(&losses, alpha);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| {
            let rs = math::safe_div(*gain, *loss);
            100.0 - (100.0 / (1.0 + rs))
        })
        .collect()
}

/// Calculate RSI of closes at the latest bar
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<RsiIndicator> {
    if candles.len() < 2 {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let value = *rsi(&closes, period as usize).last()?;

    Some(RsiIndicator { value, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<RsiIndicator> {
    calculate_rsi(candles, 14)
}
