//! Unit tests for ADX trend strength

use chrono::{TimeZone, Utc};
use trendscan::indicators::trend::{adx, calculate_adx, calculate_adx_default};
use trendscan::models::indicators::Candle;

use crate::test_utils::{flat_series, geometric_series};

#[test]
fn test_adx_empty() {
    assert!(calculate_adx(&[], 14).is_none());
}

#[test]
fn test_adx_series_lengths_match_input() {
    let candles = geometric_series(40, 1.01);
    let series = adx(&candles, 14);
    assert_eq!(series.adx.len(), 40);
    assert_eq!(series.plus_di.len(), 40);
    assert_eq!(series.minus_di.len(), 40);
}

#[test]
fn test_adx_strong_uptrend() {
    let candles = geometric_series(150, 1.01);
    let result = calculate_adx_default(&candles).unwrap();
    assert_eq!(result.period, 14);
    assert!(result.value >= 20.0, "adx {}", result.value);
    assert!(result.plus_di > result.minus_di);
}

#[test]
fn test_adx_strong_downtrend() {
    let candles = geometric_series(150, 0.99);
    let result = calculate_adx_default(&candles).unwrap();
    assert!(result.value >= 20.0, "adx {}", result.value);
    assert!(result.minus_di > result.plus_di);
}

#[test]
fn test_adx_flat_series_has_no_strength() {
    let candles = flat_series(150, 10.0);
    let result = calculate_adx_default(&candles).unwrap();
    assert!(result.value.is_finite());
    assert!(result.value < 1.0);
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "bar {}: {} != {}", i, a, e);
    }
}

/// Six bars covering a plain up move, an outside bar, an inside bar and a
/// bar whose up and down moves are equal.
fn handmade_bars() -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    [
        (10.0, 8.0, 9.0),
        (11.0, 8.5, 10.0),
        (11.5, 7.5, 8.0),
        (11.0, 8.0, 10.0),
        (12.0, 9.0, 11.0),
        (13.0, 8.0, 9.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(high, low, close))| {
        Candle::new(close, high, low, close, 1.0, start + chrono::Duration::days(i as i64))
    })
    .collect()
}

#[test]
fn test_adx_matches_hand_computed_values() {
    // Period 2 smooths with factor 0.5.
    // TR:  2, 2.5, 4, 3, 3, 5
    // ATR: 2, 2.25, 3.125, 3.0625, 3.03125, 4.015625
    // +DM: 0, 1, 0, 0, 1, 0 (equal moves on the last bar count for neither)
    // -DM: 0, 0, 1, 0, 0, 0
    let series = adx(&handmade_bars(), 2);

    assert_close(
        &series.plus_di,
        &[
            0.0,
            200.0 / 9.0,
            8.0,
            12.5 / 3.0625,
            56.25 / 3.03125,
            28.125 / 4.015625,
        ],
    );
    assert_close(
        &series.minus_di,
        &[
            0.0,
            0.0,
            16.0,
            25.0 / 3.0625,
            12.5 / 3.03125,
            6.25 / 4.015625,
        ],
    );

    // DX: 0, 100, 100/3, 100/3, 700/11, 700/11
    let dx_tail = 700.0 / 11.0;
    let fifth = (dx_tail + 37.5) / 2.0;
    assert_close(
        &series.adx,
        &[0.0, 50.0, 125.0 / 3.0, 37.5, fifth, (dx_tail + fifth) / 2.0],
    );
}

#[test]
fn test_calculate_adx_reports_last_bar() {
    let result = calculate_adx(&handmade_bars(), 2).unwrap();
    assert_eq!(result.period, 2);
    assert!((result.value - 57.102_272_727_272_73).abs() < 1e-9);
    assert!((result.plus_di - 28.125 / 4.015625).abs() < 1e-9);
    assert!((result.minus_di - 6.25 / 4.015625).abs() < 1e-9);
}
