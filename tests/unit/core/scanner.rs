//! Unit tests for the scan orchestrator

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use trendscan::config::ScanConfig;
use trendscan::core::scanner::{evaluate_instrument, InstrumentOutcome, Scanner};
use trendscan::metrics::Metrics;
use trendscan::models::regime::{MarketNarrative, MarketRegime};
use trendscan::models::market::Interval;
use trendscan::models::signal::SignalDirection;
use trendscan::signals::engine::SignalEngine;

use crate::test_utils::{geometric_series, long_setup, short_setup, MockMarketData};

fn empty_regime() -> MarketRegime {
    MarketRegime {
        references: Vec::new(),
        narrative: MarketNarrative::Unavailable,
    }
}

fn fast_config() -> ScanConfig {
    ScanConfig {
        instrument_timeout: Duration::from_millis(200),
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn test_empty_universe_yields_empty_report() {
    let scanner = Scanner::new(Arc::new(MockMarketData::new()), fast_config());
    let report = scanner.scan(&[], empty_regime()).await;

    assert!(!report.has_signals());
    assert_eq!(report.scanned, 0);
    assert_eq!(report.skipped.total(), 0);
    assert_eq!(report.faults, 0);
}

#[tokio::test]
async fn test_signals_capped_per_direction_in_discovery_order() {
    let mut provider = MockMarketData::new();
    for i in 0..30 {
        provider = provider.with_instrument(&format!("L{:02}_USDT", i), "USDT", long_setup());
    }
    provider = provider.with_instrument("S00_USDT", "USDT", short_setup());
    let universe = provider.instruments.clone();

    let scanner = Scanner::new(Arc::new(provider), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(report.longs.len(), 25);
    assert_eq!(report.qualified_longs, 30);
    assert_eq!(report.shorts.len(), 1);
    assert_eq!(report.qualified_shorts, 1);
    assert_eq!(report.longs[0].symbol(), "L00_USDT");
    assert_eq!(report.longs[24].symbol(), "L24_USDT");
    assert!(report
        .longs
        .iter()
        .all(|r| r.direction() == SignalDirection::Long));
}

#[tokio::test]
async fn test_fault_is_isolated() {
    let provider = MockMarketData::new()
        .with_instrument("A_USDT", "USDT", long_setup())
        .with_failing("B_USDT")
        .with_instrument("C_USDT", "USDT", short_setup());
    let universe = provider.instruments.clone();

    let scanner = Scanner::new(Arc::new(provider), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(report.scanned, 3);
    assert_eq!(report.faults, 1);
    assert_eq!(report.longs.len(), 1);
    assert_eq!(report.shorts.len(), 1);
}

#[tokio::test]
async fn test_stalled_instrument_times_out() {
    let provider = MockMarketData::new()
        .with_stalled("SLOW_USDT")
        .with_instrument("A_USDT", "USDT", long_setup());
    let universe = provider.instruments.clone();

    let scanner = Scanner::new(Arc::new(provider), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(report.faults, 1);
    assert_eq!(report.longs.len(), 1);
}

#[tokio::test]
async fn test_universe_filtered_by_quote_currency() {
    let provider = MockMarketData::new()
        .with_instrument("A_USDT", "USDT", long_setup())
        .with_instrument("A_USDC", "USDC", long_setup())
        .with_instrument("B_USDT", "usdt", long_setup());
    let universe = provider.instruments.clone();
    let provider = Arc::new(provider);

    let scanner = Scanner::new(provider.clone(), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(report.scanned, 2);
    assert_eq!(provider.candle_calls.load(Ordering::SeqCst), 2);
    assert!(report.longs.iter().all(|r| r.symbol() != "A_USDC"));
}

#[tokio::test]
async fn test_disqualifications_tallied() {
    let short_history: Vec<_> = long_setup().into_iter().take(50).collect();
    let provider = MockMarketData::new()
        .with_instrument("NEW_USDT", "USDT", short_history)
        .with_instrument("QUIET_USDT", "USDT", geometric_series(150, 1.01))
        .with_instrument("A_USDT", "USDT", long_setup());
    let universe = provider.instruments.clone();

    let scanner = Scanner::new(Arc::new(provider), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(report.skipped.insufficient_history, 1);
    assert_eq!(report.skipped.no_volume_anomaly, 1);
    assert_eq!(report.skipped.total(), 2);
    assert_eq!(report.qualified_longs, 1);
}

#[tokio::test]
async fn test_funding_fetched_only_for_signals() {
    let provider = MockMarketData::new()
        .with_instrument("A_USDT", "USDT", long_setup())
        .with_instrument("QUIET_USDT", "USDT", geometric_series(150, 1.01))
        .with_funding("A_USDT", 0.03)
        .with_funding("QUIET_USDT", 0.03);
    let universe = provider.instruments.clone();
    let provider = Arc::new(provider);

    let scanner = Scanner::new(provider.clone(), fast_config());
    let report = scanner.scan(&universe, empty_regime()).await;

    assert_eq!(provider.funding_calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.longs[0].funding_rate(), Some(0.03));
    assert!(report.longs[0].summary().ends_with(" | Funding:+0.030"));
}

#[tokio::test]
async fn test_scan_updates_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let provider = MockMarketData::new()
        .with_instrument("A_USDT", "USDT", long_setup())
        .with_failing("B_USDT");
    let universe = provider.instruments.clone();

    let scanner = Scanner::new(Arc::new(provider), fast_config()).with_metrics(metrics.clone());
    scanner.scan(&universe, empty_regime()).await;

    assert_eq!(metrics.instrument_faults_total.get(), 1);
    assert_eq!(metrics.signals_total.with_label_values(&["long"]).get(), 1);
    assert_eq!(metrics.instruments_in_flight.get(), 0);
}

#[tokio::test]
async fn test_evaluate_instrument_reports_provider_error() {
    let provider = MockMarketData::new().with_failing("B_USDT");
    let engine = SignalEngine::default();
    let result = evaluate_instrument(&provider, &engine, "B_USDT", Interval::Day1, 400).await;
    assert!(result.is_err());

    let provider = MockMarketData::new().with_instrument("A_USDT", "USDT", long_setup());
    let result = evaluate_instrument(&provider, &engine, "A_USDT", Interval::Day1, 400)
        .await
        .unwrap();
    assert!(matches!(result, InstrumentOutcome::Signal(_)));
}
