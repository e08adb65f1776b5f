//! Volume spike detection

use crate::common::math;
use crate::models::indicators::{Candle, VolumeAnomaly};

/// Ratio of the latest volume to the mean of the preceding `window` bars.
///
/// Needs at least `window + 2` bars; shorter series report
/// [`VolumeAnomaly::InsufficientData`]. The spike is flagged when
/// `ratio >= threshold`.
pub fn volume_anomaly(candles: &[Candle], window: usize, threshold: f64) -> VolumeAnomaly {
    if candles.len() < window + 2 {
        return VolumeAnomaly::InsufficientData;
    }

    let last = candles.len() - 1;
    let trailing: Vec<f64> = candles[last - window..last]
        .iter()
        .map(|c| c.volume)
        .collect();
    let Some(baseline) = math::mean(&trailing) else {
        return VolumeAnomaly::InsufficientData;
    };

    let ratio = math::safe_div(candles[last].volume, baseline);
    VolumeAnomaly::Measured {
        ratio,
        flagged: ratio >= threshold,
    }
}

/// Volume anomaly with the default 30-bar window and 2x threshold
pub fn volume_anomaly_default(candles: &[Candle]) -> VolumeAnomaly {
    volume_anomaly(candles, 30, 2.0)
}
