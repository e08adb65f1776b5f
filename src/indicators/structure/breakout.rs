//! Break-of-structure detection against a trailing window

use crate::common::math;
use crate::models::indicators::{BreakoutIndicator, Candle};

/// Bars `[len - exclude - lookback, len - exclude)`, clamped to the series.
fn reference_window(candles: &[Candle], lookback: usize, exclude: usize) -> &[Candle] {
    let end = candles.len().saturating_sub(exclude);
    let start = end.saturating_sub(lookback);
    &candles[start..end]
}

/// True when the latest close is strictly above every high in the window
/// ending `exclude` bars before the latest bar.
pub fn breakout_up(candles: &[Candle], lookback: usize, exclude: usize) -> bool {
    let Some(last) = candles.last() else {
        return false;
    };
    let window = reference_window(candles, lookback, exclude);
    match math::max_finite(window.iter().map(|c| c.high)) {
        Some(highest) => last.close > highest,
        None => false,
    }
}

/// True when the latest close is strictly below every low in the window
/// ending `exclude` bars before the latest bar.
pub fn breakout_down(candles: &[Candle], lookback: usize, exclude: usize) -> bool {
    let Some(last) = candles.last() else {
        return false;
    };
    let window = reference_window(candles, lookback, exclude);
    match math::min_finite(window.iter().map(|c| c.low)) {
        Some(lowest) => last.close < lowest,
        None => false,
    }
}

pub fn calculate_breakout(candles: &[Candle], lookback: u32, exclude: u32) -> BreakoutIndicator {
    BreakoutIndicator {
        up: breakout_up(candles, lookback as usize, exclude as usize),
        down: breakout_down(candles, lookback as usize, exclude as usize),
        lookback,
        exclude,
    }
}

/// Breakout flags with the default 60-bar lookback, excluding the latest bar
pub fn calculate_breakout_default(candles: &[Candle]) -> BreakoutIndicator {
    calculate_breakout(candles, 60, 1)
}
