use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::regime::MarketRegime;
use super::signal::{DisqualificationReason, SignalRecord};

/// Counts of each disqualification reason seen during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipTally {
    pub insufficient_history: usize,
    pub illiquid: usize,
    pub excessive_gap: usize,
    pub no_volume_anomaly: usize,
}

impl SkipTally {
    pub fn record(&mut self, reason: DisqualificationReason) {
        *self.slot(reason) += 1;
    }

    pub fn get(&self, reason: DisqualificationReason) -> usize {
        match reason {
            DisqualificationReason::InsufficientHistory => self.insufficient_history,
            DisqualificationReason::Illiquid => self.illiquid,
            DisqualificationReason::ExcessiveGap => self.excessive_gap,
            DisqualificationReason::NoVolumeAnomaly => self.no_volume_anomaly,
        }
    }

    pub fn total(&self) -> usize {
        DisqualificationReason::ALL.iter().map(|r| self.get(*r)).sum()
    }

    fn slot(&mut self, reason: DisqualificationReason) -> &mut usize {
        match reason {
            DisqualificationReason::InsufficientHistory => &mut self.insufficient_history,
            DisqualificationReason::Illiquid => &mut self.illiquid,
            DisqualificationReason::ExcessiveGap => &mut self.excessive_gap,
            DisqualificationReason::NoVolumeAnomaly => &mut self.no_volume_anomaly,
        }
    }
}

/// Outcome of one full pass over the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub regime: MarketRegime,
    /// LONG records in discovery order, capped for brevity.
    pub longs: Vec<SignalRecord>,
    /// SHORT records in discovery order, capped for brevity.
    pub shorts: Vec<SignalRecord>,
    /// LONG signals found before capping.
    pub qualified_longs: usize,
    /// SHORT signals found before capping.
    pub qualified_shorts: usize,
    pub skipped: SkipTally,
    /// Instruments whose fetch or evaluation failed or timed out.
    pub faults: usize,
    pub scanned: usize,
}

impl ScanReport {
    pub fn has_signals(&self) -> bool {
        !self.longs.is_empty() || !self.shorts.is_empty()
    }
}
