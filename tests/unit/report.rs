//! Unit tests for report rendering

use chrono::{TimeZone, Utc};
use trendscan::models::regime::{MarketNarrative, MarketRegime, ReferenceTrend, TrendState};
use trendscan::models::report::{ScanReport, SkipTally};
use trendscan::models::signal::DisqualificationReason;
use trendscan::report::{escape_markdown, render, render_universe_unavailable};
use trendscan::signals::engine::{classify, AuxData};

use crate::test_utils::{long_setup, short_setup};

fn regime() -> MarketRegime {
    MarketRegime {
        references: vec![
            ReferenceTrend {
                label: "BTC".to_string(),
                state: TrendState::Strong,
            },
            ReferenceTrend {
                label: "ETH".to_string(),
                state: TrendState::Neutral,
            },
        ],
        narrative: MarketNarrative::Unavailable,
    }
}

fn report() -> ScanReport {
    ScanReport {
        generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        regime: regime(),
        longs: Vec::new(),
        shorts: Vec::new(),
        qualified_longs: 0,
        qualified_shorts: 0,
        skipped: SkipTally::default(),
        faults: 0,
        scanned: 0,
    }
}

#[test]
fn test_render_header() {
    let text = render(&report());
    assert!(text.contains("2024-05-01 08:30 UTC"));
    assert!(text.contains("BTC: STRONG | ETH: NEUTRAL"));
    assert!(text.contains("Market: data unavailable."));
}

#[test]
fn test_render_without_signals() {
    let text = render(&report());
    assert!(text.contains("No instruments currently meet the daily criteria."));
    assert!(!text.contains("*BUY:*"));
    assert!(!text.contains("*SELL:*"));
}

#[test]
fn test_render_sections_and_summary() {
    let long = classify("SOL_USDT", &long_setup(), &AuxData::default());
    let short = classify("DOGE_USDT", &short_setup(), &AuxData::default());

    let mut skipped = SkipTally::default();
    skipped.record(DisqualificationReason::Illiquid);
    skipped.record(DisqualificationReason::Illiquid);
    skipped.record(DisqualificationReason::NoVolumeAnomaly);

    let report = ScanReport {
        longs: vec![long.signal().unwrap().clone()],
        shorts: vec![short.signal().unwrap().clone()],
        qualified_longs: 30,
        qualified_shorts: 1,
        skipped,
        faults: 2,
        scanned: 36,
        ..report()
    };

    let text = render(&report);
    let buy = text.find("*BUY:*").unwrap();
    let sell = text.find("*SELL:*").unwrap();
    assert!(buy < sell);
    assert!(text.contains("- SOL\\_USDT | Trend:↑"));
    assert!(text.contains("- DOGE\\_USDT | Trend:↓"));
    assert!(!text.contains("No instruments currently meet"));
    assert!(text.contains(
        "Summary: BUY:30 | SELL:1 | Skipped (liquidity:2, gap:0, volume:1, history:0) | Failed:2"
    ));
}

#[test]
fn test_universe_unavailable_message() {
    assert!(render_universe_unavailable().contains("unavailable"));
}

#[test]
fn test_escape_markdown_entity_markers() {
    assert_eq!(escape_markdown("BTC_USDT"), "BTC\\_USDT");
    assert_eq!(escape_markdown("a*b`c[d]"), "a\\*b\\`c\\[d]");
    assert_eq!(escape_markdown("Trend:↑ | RSI:61.2"), "Trend:↑ | RSI:61.2");
}

#[test]
fn test_render_leaves_no_unescaped_underscores() {
    let long = classify("BTC_USDT", &long_setup(), &AuxData::default());
    let report = ScanReport {
        longs: vec![long.signal().unwrap().clone()],
        qualified_longs: 1,
        ..report()
    };

    let text = render(&report);
    let chars: Vec<char> = text.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c == '_' {
            assert!(i > 0 && chars[i - 1] == '\\', "unescaped underscore in {}", text);
        }
    }
    assert!(text.contains("- BTC\\_USDT | Trend:↑"));
}
