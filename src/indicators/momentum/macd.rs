//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema;
use crate::models::indicators::{Candle, MacdIndicator};

/// Line, signal and histogram series.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_span) of MACD
/// Histogram = MACD - Signal
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal = ema(&line, signal_span);
    let histogram = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

/// Calculate MACD of closes at the latest bar
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let series = macd(
        &closes,
        fast_period as usize,
        slow_period as usize,
        signal_period as usize,
    );

    Some(MacdIndicator {
        macd: *series.line.last()?,
        signal: *series.signal.last()?,
        histogram: *series.histogram.last()?,
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}
