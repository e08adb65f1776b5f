//! Per-instrument classifier: an ordered filter chain followed by the
//! direction decision.
//!
//! Stages, in order:
//! 1. history length
//! 2. liquidity (latest turnover)
//! 3. close-to-close gap
//! 4. volume anomaly
//! 5. direction decision (LONG / SHORT / silent exclusion)
//! 6. optional funding annotation on the produced record
//!
//! Stages 1-4 short-circuit with a [`DisqualificationReason`]. Stage 5 never
//! produces a reason.

use serde::{Deserialize, Serialize};

use crate::common::math;
use crate::indicators::{
    calculate_adx, calculate_breakout, calculate_ema, calculate_macd, calculate_rsi,
    volume_anomaly,
};
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::signal::{
    Classification, DisqualificationReason, SignalDirection, SignalRecord,
};
use crate::signals::summary;

pub const MIN_CANDLES: usize = 120;

/// Thresholds and indicator parameters for the filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    pub min_history: usize,
    /// Floor on the latest bar's quote-currency turnover.
    pub min_turnover: f64,
    /// Largest tolerated absolute close-to-close return.
    pub max_gap: f64,
    pub ema_fast: u32,
    pub ema_slow: u32,
    pub rsi_period: u32,
    pub long_rsi_min: f64,
    pub short_rsi_max: f64,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    pub adx_period: u32,
    pub min_adx: f64,
    pub breakout_lookback: u32,
    pub breakout_exclude: u32,
    pub volume_window: usize,
    pub volume_threshold: f64,
    /// Funding rates at or below this magnitude are not shown.
    pub funding_annotation_threshold: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_history: MIN_CANDLES,
            min_turnover: 5_000_000.0,
            max_gap: 0.12,
            ema_fast: 20,
            ema_slow: 50,
            rsi_period: 14,
            long_rsi_min: 55.0,
            short_rsi_max: 45.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            adx_period: 14,
            min_adx: 20.0,
            breakout_lookback: 60,
            breakout_exclude: 1,
            volume_window: 30,
            volume_threshold: 2.0,
            funding_annotation_threshold: 0.01,
        }
    }
}

/// Auxiliary per-instrument data that does not come from the bar series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AuxData {
    pub funding_rate: Option<f64>,
}

/// An instrument that passed stages 1-5 and has a direction, awaiting the
/// funding annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    symbol: String,
    direction: SignalDirection,
    snapshot: IndicatorSnapshot,
    funding_threshold: f64,
}

impl Candidate {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn direction(&self) -> SignalDirection {
        self.direction
    }

    pub fn snapshot(&self) -> &IndicatorSnapshot {
        &self.snapshot
    }

    /// Finalise the candidate into an immutable record. The funding rate is
    /// kept only when its magnitude exceeds the annotation threshold.
    pub fn into_record(self, funding_rate: Option<f64>) -> SignalRecord {
        let funding = funding_rate
            .filter(|rate| rate.abs() > self.funding_threshold);
        let line = summary::summary_line(&self.symbol, &self.snapshot, funding);
        SignalRecord::new(self.symbol, self.direction, line, funding, self.snapshot)
    }
}

/// Result of stages 1-5.
#[derive(Debug, Clone, PartialEq)]
pub enum Screening {
    Candidate(Candidate),
    Disqualified(DisqualificationReason),
    NoSignal,
}

pub struct SignalEngine {
    params: ClassifierParams,
}

impl SignalEngine {
    pub fn new(params: ClassifierParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Run the full chain, funding annotation included.
    pub fn classify(&self, symbol: &str, candles: &[Candle], aux: &AuxData) -> Classification {
        match self.screen(symbol, candles) {
            Screening::Candidate(candidate) => {
                Classification::Signal(candidate.into_record(aux.funding_rate))
            }
            Screening::Disqualified(reason) => Classification::Disqualified(reason),
            Screening::NoSignal => Classification::NoSignal,
        }
    }

    /// Run stages 1-5 without the funding annotation, so callers can defer
    /// the funding lookup to instruments that actually produce a signal.
    pub fn screen(&self, symbol: &str, candles: &[Candle]) -> Screening {
        let p = &self.params;

        if candles.len() < p.min_history {
            return Screening::Disqualified(DisqualificationReason::InsufficientHistory);
        }
        let Some(last) = candles.last() else {
            return Screening::Disqualified(DisqualificationReason::InsufficientHistory);
        };

        if last.turnover_or_notional() < p.min_turnover {
            return Screening::Disqualified(DisqualificationReason::Illiquid);
        }

        if let Some(prev) = candles.len().checked_sub(2).map(|i| &candles[i]) {
            let gap = (math::safe_div(last.close, prev.close) - 1.0).abs();
            if gap > p.max_gap {
                return Screening::Disqualified(DisqualificationReason::ExcessiveGap);
            }
        }

        let Some(snapshot) = self.snapshot(candles) else {
            return Screening::Disqualified(DisqualificationReason::InsufficientHistory);
        };

        if !snapshot.volume.is_flagged() {
            return Screening::Disqualified(DisqualificationReason::NoVolumeAnomaly);
        }

        match self.decide(&snapshot) {
            Some(direction) => Screening::Candidate(Candidate {
                symbol: symbol.to_string(),
                direction,
                snapshot,
                funding_threshold: p.funding_annotation_threshold,
            }),
            None => Screening::NoSignal,
        }
    }

    /// Evaluate every indicator at the latest bar.
    pub fn snapshot(&self, candles: &[Candle]) -> Option<IndicatorSnapshot> {
        let p = &self.params;
        let close = candles.last()?.close;
        let prev_close = candles
            .len()
            .checked_sub(2)
            .map(|i| candles[i].close)
            .unwrap_or(f64::NAN);

        Some(IndicatorSnapshot {
            close,
            prev_close,
            ema_fast: calculate_ema(candles, p.ema_fast)?,
            ema_slow: calculate_ema(candles, p.ema_slow)?,
            rsi: calculate_rsi(candles, p.rsi_period)?,
            macd: calculate_macd(candles, p.macd_fast, p.macd_slow, p.macd_signal)?,
            adx: calculate_adx(candles, p.adx_period)?,
            breakout: calculate_breakout(candles, p.breakout_lookback, p.breakout_exclude),
            volume: volume_anomaly(candles, p.volume_window, p.volume_threshold),
        })
    }

    fn decide(&self, s: &IndicatorSnapshot) -> Option<SignalDirection> {
        let p = &self.params;
        let strong = s.adx.value >= p.min_adx;

        if s.trend_up() && s.rsi.value > p.long_rsi_min && s.macd.is_bullish() && strong {
            return Some(SignalDirection::Long);
        }

        // Distribution proxy: a down close while the volume spike holds.
        let distribution = s.closed_lower() && s.volume.is_flagged();
        if s.trend_down()
            && s.rsi.value < p.short_rsi_max
            && s.macd.is_bearish()
            && strong
            && (s.breakout.down || distribution)
        {
            return Some(SignalDirection::Short);
        }

        None
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(ClassifierParams::default())
    }
}

/// Classify one instrument with the default parameters.
pub fn classify(symbol: &str, candles: &[Candle], aux: &AuxData) -> Classification {
    SignalEngine::default().classify(symbol, candles, aux)
}
