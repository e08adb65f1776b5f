//! Unit tests for volume anomaly detection

use trendscan::indicators::volume::{volume_anomaly, volume_anomaly_default};
use trendscan::models::indicators::VolumeAnomaly;

use crate::test_utils::{flat_series, with_volume_spike};

#[test]
fn test_window_plus_one_bars_is_insufficient() {
    let candles = with_volume_spike(flat_series(31, 1.0), 3.0);
    let result = volume_anomaly(&candles, 30, 2.0);
    assert_eq!(result, VolumeAnomaly::InsufficientData);
    assert!(result.is_insufficient());
    assert!(!result.is_flagged());
    assert_eq!(result.ratio(), 1.0);
}

#[test]
fn test_window_plus_two_bars_measures_spike() {
    let candles = with_volume_spike(flat_series(32, 1.0), 3.0);
    let result = volume_anomaly(&candles, 30, 2.0);
    assert!(result.is_flagged());
    assert!((result.ratio() - 3.0).abs() < 1e-9);
}

#[test]
fn test_moderate_volume_not_flagged() {
    let candles = with_volume_spike(flat_series(60, 1.0), 1.5);
    let result = volume_anomaly_default(&candles);
    assert!(!result.is_flagged());
    assert!((result.ratio() - 1.5).abs() < 1e-9);
}

#[test]
fn test_trailing_window_excludes_latest_bar() {
    let mut candles = flat_series(40, 1.0);
    // Old spike outside the 30-bar window must not move the baseline.
    candles[2].volume = 1_000_000.0;
    let candles = with_volume_spike(candles, 2.5);
    let result = volume_anomaly(&candles, 30, 2.0);
    assert!((result.ratio() - 2.5).abs() < 1e-9);
}

#[test]
fn test_zero_baseline_does_not_panic() {
    let mut candles = flat_series(40, 1.0);
    for c in candles.iter_mut() {
        c.volume = 0.0;
    }
    let result = volume_anomaly(&candles, 30, 2.0);
    assert!(result.ratio().is_finite());
    assert!(!result.is_flagged());
}
