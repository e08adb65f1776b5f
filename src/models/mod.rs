//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod regime;
pub mod report;
pub mod signal;

pub use indicators::{
    AdxIndicator, BreakoutIndicator, Candle, EmaIndicator, IndicatorSnapshot, MacdIndicator,
    RsiIndicator, VolumeAnomaly,
};
pub use market::{Instrument, Interval};
pub use regime::{
    Arrow, MarketNarrative, MarketRegime, MarketStats, ReferenceTrend, Rotation,
    RotationSummary, StablecoinSentiment, TrendState,
};
pub use report::{ScanReport, SkipTally};
pub use signal::{Classification, DisqualificationReason, SignalDirection, SignalRecord};
