use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Long => "long",
            SignalDirection::Short => "short",
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Long => f.write_str("LONG"),
            SignalDirection::Short => f.write_str("SHORT"),
        }
    }
}

/// Why an instrument was dropped before the direction decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisqualificationReason {
    InsufficientHistory,
    Illiquid,
    ExcessiveGap,
    NoVolumeAnomaly,
}

impl DisqualificationReason {
    pub const ALL: [DisqualificationReason; 4] = [
        DisqualificationReason::InsufficientHistory,
        DisqualificationReason::Illiquid,
        DisqualificationReason::ExcessiveGap,
        DisqualificationReason::NoVolumeAnomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisqualificationReason::InsufficientHistory => "insufficient_history",
            DisqualificationReason::Illiquid => "illiquid",
            DisqualificationReason::ExcessiveGap => "excessive_gap",
            DisqualificationReason::NoVolumeAnomaly => "no_volume_anomaly",
        }
    }
}

impl fmt::Display for DisqualificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A produced signal. Fields are read-only once the record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    symbol: String,
    direction: SignalDirection,
    summary: String,
    funding_rate: Option<f64>,
    snapshot: IndicatorSnapshot,
}

impl SignalRecord {
    pub fn new(
        symbol: String,
        direction: SignalDirection,
        summary: String,
        funding_rate: Option<f64>,
        snapshot: IndicatorSnapshot,
    ) -> Self {
        Self {
            symbol,
            direction,
            summary,
            funding_rate,
            snapshot,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn direction(&self) -> SignalDirection {
        self.direction
    }

    /// Human-readable line with the contributing indicator values.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn funding_rate(&self) -> Option<f64> {
        self.funding_rate
    }

    pub fn snapshot(&self) -> &IndicatorSnapshot {
        &self.snapshot
    }

    pub fn price(&self) -> f64 {
        self.snapshot.close
    }
}

/// Result of running one instrument through the filter chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Signal(SignalRecord),
    Disqualified(DisqualificationReason),
    /// Passed every filter but matched neither direction; not tallied.
    NoSignal,
}

impl Classification {
    pub fn signal(&self) -> Option<&SignalRecord> {
        match self {
            Classification::Signal(record) => Some(record),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<DisqualificationReason> {
        match self {
            Classification::Disqualified(reason) => Some(*reason),
            _ => None,
        }
    }
}
