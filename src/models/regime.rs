use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily trend state of a reference asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendState {
    Strong,
    Weak,
    Neutral,
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendState::Strong => f.write_str("STRONG"),
            TrendState::Weak => f.write_str("WEAK"),
            TrendState::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrow {
    Up,
    Down,
    Flat,
}

impl Arrow {
    /// Direction of `lhs` relative to `rhs`.
    pub fn compare(lhs: f64, rhs: f64) -> Self {
        if lhs > rhs {
            Arrow::Up
        } else if lhs < rhs {
            Arrow::Down
        } else {
            Arrow::Flat
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Arrow::Up => "↑",
            Arrow::Down => "↓",
            Arrow::Flat => "→",
        }
    }
}

/// Where capital is flowing relative to BTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    IntoAlternatives,
    Out,
    Mixed,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::IntoAlternatives => f.write_str("↑ (rotation into alternative assets)"),
            Rotation::Out => f.write_str("↓ (rotation out)"),
            Rotation::Mixed => f.write_str("→ (mixed)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StablecoinSentiment {
    RiskOff,
    RiskOn,
}

impl fmt::Display for StablecoinSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StablecoinSentiment::RiskOff => f.write_str("risk-off"),
            StablecoinSentiment::RiskOn => f.write_str("risk-on"),
        }
    }
}

/// Aggregate statistics feeding the rotation narrative. Any `None` field
/// makes the narrative unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub total_market_cap_change_pct: Option<f64>,
    pub btc_dominance_pct: Option<f64>,
    pub usdt_dominance_pct: Option<f64>,
    pub btc_change_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSummary {
    /// BTC's own 24h direction.
    pub btc_direction: Arrow,
    /// BTC's 24h change against the aggregate change.
    pub relative_strength: Arrow,
    pub btc_dominance_pct: f64,
    pub rotation: Rotation,
    pub usdt_dominance_pct: f64,
    pub stablecoin: Option<StablecoinSentiment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MarketNarrative {
    Available(RotationSummary),
    Unavailable,
}

impl MarketNarrative {
    pub const UNAVAILABLE_TEXT: &'static str = "Market: data unavailable.";
}

impl fmt::Display for MarketNarrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketNarrative::Unavailable => f.write_str(Self::UNAVAILABLE_TEXT),
            MarketNarrative::Available(s) => {
                write!(
                    f,
                    "Market: BTC {} + BTC.D {} (BTC.D {:.1}%) | Total2: {} | USDT.D: {:.1}%",
                    s.btc_direction.glyph(),
                    s.relative_strength.glyph(),
                    s.btc_dominance_pct,
                    s.rotation,
                    s.usdt_dominance_pct,
                )?;
                if let Some(sentiment) = s.stablecoin {
                    write!(f, " ({})", sentiment)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTrend {
    pub label: String,
    pub state: TrendState,
}

/// Per-scan market context. Rebuilt every scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRegime {
    pub references: Vec<ReferenceTrend>,
    pub narrative: MarketNarrative,
}

impl MarketRegime {
    pub fn state_of(&self, label: &str) -> Option<TrendState> {
        self.references
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.state)
    }
}
