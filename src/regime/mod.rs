//! Market regime summary: reference-asset trend states and the
//! capital-rotation narrative.

use crate::indicators::{calculate_ema, calculate_rsi};
use crate::models::indicators::Candle;
use crate::models::regime::{
    Arrow, MarketNarrative, MarketRegime, MarketStats, ReferenceTrend, Rotation,
    RotationSummary, StablecoinSentiment, TrendState,
};

pub const TREND_EMA_FAST: u32 = 20;
pub const TREND_EMA_SLOW: u32 = 50;
pub const TREND_RSI_PERIOD: u32 = 14;
pub const TREND_RSI_PIVOT: f64 = 50.0;

/// Stablecoin dominance at or above this reads as risk-off.
pub const RISK_OFF_USDT_DOMINANCE: f64 = 7.0;
/// Stablecoin dominance at or below this reads as risk-on.
pub const RISK_ON_USDT_DOMINANCE: f64 = 5.0;

/// A reference asset's daily history. An empty slice stands for a failed fetch.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSeries<'a> {
    pub label: &'a str,
    pub candles: &'a [Candle],
}

impl<'a> ReferenceSeries<'a> {
    pub fn new(label: &'a str, candles: &'a [Candle]) -> Self {
        Self { label, candles }
    }
}

/// STRONG when EMA20 > EMA50 and RSI(14) > 50, WEAK when both are reversed,
/// NEUTRAL otherwise or when the series is too short to evaluate.
pub fn classify_trend_state(candles: &[Candle]) -> TrendState {
    let (Some(fast), Some(slow), Some(rsi)) = (
        calculate_ema(candles, TREND_EMA_FAST),
        calculate_ema(candles, TREND_EMA_SLOW),
        calculate_rsi(candles, TREND_RSI_PERIOD),
    ) else {
        return TrendState::Neutral;
    };

    if fast.value > slow.value && rsi.value > TREND_RSI_PIVOT {
        TrendState::Strong
    } else if fast.value < slow.value && rsi.value < TREND_RSI_PIVOT {
        TrendState::Weak
    } else {
        TrendState::Neutral
    }
}

/// Compare BTC's 24h change with the aggregate market's and derive the
/// rotation reading.
pub fn rotation(btc_change_pct: f64, total_change_pct: f64) -> (Arrow, Rotation) {
    let relative = Arrow::compare(btc_change_pct, total_change_pct);
    let rotation = match relative {
        Arrow::Down if total_change_pct >= 0.0 => Rotation::IntoAlternatives,
        Arrow::Up if total_change_pct <= 0.0 => Rotation::Out,
        _ => Rotation::Mixed,
    };
    (relative, rotation)
}

pub fn stablecoin_sentiment(usdt_dominance_pct: f64) -> Option<StablecoinSentiment> {
    if usdt_dominance_pct >= RISK_OFF_USDT_DOMINANCE {
        Some(StablecoinSentiment::RiskOff)
    } else if usdt_dominance_pct <= RISK_ON_USDT_DOMINANCE {
        Some(StablecoinSentiment::RiskOn)
    } else {
        None
    }
}

/// Build the narrative; any missing field degrades to
/// [`MarketNarrative::Unavailable`].
pub fn market_narrative(stats: &MarketStats) -> MarketNarrative {
    let (Some(total), Some(btc_dom), Some(usdt_dom), Some(btc_change)) = (
        stats.total_market_cap_change_pct,
        stats.btc_dominance_pct,
        stats.usdt_dominance_pct,
        stats.btc_change_pct,
    ) else {
        return MarketNarrative::Unavailable;
    };

    let (relative_strength, rotation) = rotation(btc_change, total);
    MarketNarrative::Available(RotationSummary {
        btc_direction: Arrow::compare(btc_change, 0.0),
        relative_strength,
        btc_dominance_pct: btc_dom,
        rotation,
        usdt_dominance_pct: usdt_dom,
        stablecoin: stablecoin_sentiment(usdt_dom),
    })
}

pub fn summarize_regime(
    references: &[ReferenceSeries<'_>],
    stats: Option<&MarketStats>,
) -> MarketRegime {
    let references = references
        .iter()
        .map(|r| ReferenceTrend {
            label: r.label.to_string(),
            state: classify_trend_state(r.candles),
        })
        .collect();

    MarketRegime {
        references,
        narrative: stats
            .map(market_narrative)
            .unwrap_or(MarketNarrative::Unavailable),
    }
}
