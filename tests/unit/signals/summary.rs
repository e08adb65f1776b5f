//! Unit tests for signal summary lines

use trendscan::signals::engine::SignalEngine;
use trendscan::signals::summary::{funding_annotation, summary_line};

use crate::test_utils::{long_setup, short_setup};

#[test]
fn test_funding_annotation_keeps_sign() {
    assert_eq!(funding_annotation(0.012), " | Funding:+0.012");
    assert_eq!(funding_annotation(-0.02), " | Funding:-0.020");
}

#[test]
fn test_long_summary_line() {
    let candles = long_setup();
    let snapshot = SignalEngine::default().snapshot(&candles).unwrap();
    let line = summary_line("SOL_USDT", &snapshot, None);

    assert!(line.starts_with("SOL_USDT | Trend:↑ | RSI:"), "{}", line);
    assert!(line.contains(" | Vol x3.00 | "), "{}", line);
    assert!(line.contains(" | BoS:↑ | "), "{}", line);
    assert!(line.ends_with(&format!("Price:{}", snapshot.close)), "{}", line);
}

#[test]
fn test_short_summary_line_with_funding() {
    let candles = short_setup();
    let snapshot = SignalEngine::default().snapshot(&candles).unwrap();
    let line = summary_line("DOGE_USDT", &snapshot, Some(-0.03));

    assert!(line.starts_with("DOGE_USDT | Trend:↓ | "), "{}", line);
    assert!(line.contains(" | BoS:↓ | "), "{}", line);
    assert!(line.ends_with(" | Funding:-0.030"), "{}", line);
}
