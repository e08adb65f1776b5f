use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Quote-currency traded value, when the venue reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            turnover: None,
            timestamp,
        }
    }

    pub fn with_turnover(mut self, turnover: f64) -> Self {
        self.turnover = Some(turnover);
        self
    }

    /// Reported turnover, falling back to `close * volume`.
    pub fn turnover_or_notional(&self) -> f64 {
        self.turnover.unwrap_or(self.close * self.volume)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub period: (u32, u32, u32),
}

impl MacdIndicator {
    pub fn is_bullish(&self) -> bool {
        self.macd > self.signal
    }

    pub fn is_bearish(&self) -> bool {
        self.macd < self.signal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxIndicator {
    pub value: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub period: u32,
}

/// Break-of-structure flags for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutIndicator {
    pub up: bool,
    pub down: bool,
    pub lookback: u32,
    pub exclude: u32,
}

/// Latest volume relative to its trailing mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VolumeAnomaly {
    /// Fewer than `window + 2` bars were available.
    InsufficientData,
    Measured { ratio: f64, flagged: bool },
}

impl VolumeAnomaly {
    /// Measured ratio, or `1.0` when there was not enough history.
    pub fn ratio(&self) -> f64 {
        match self {
            VolumeAnomaly::InsufficientData => 1.0,
            VolumeAnomaly::Measured { ratio, .. } => *ratio,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, VolumeAnomaly::Measured { flagged: true, .. })
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, VolumeAnomaly::InsufficientData)
    }
}

/// Every indicator the classifier reads, evaluated at the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub prev_close: f64,
    pub ema_fast: EmaIndicator,
    pub ema_slow: EmaIndicator,
    pub rsi: RsiIndicator,
    pub macd: MacdIndicator,
    pub adx: AdxIndicator,
    pub breakout: BreakoutIndicator,
    pub volume: VolumeAnomaly,
}

impl IndicatorSnapshot {
    pub fn trend_up(&self) -> bool {
        self.ema_fast.value > self.ema_slow.value
    }

    pub fn trend_down(&self) -> bool {
        self.ema_fast.value < self.ema_slow.value
    }

    pub fn closed_lower(&self) -> bool {
        self.close < self.prev_close
    }
}
