//! Chat-friendly rendering of a scan report

use crate::models::report::ScanReport;
use crate::models::signal::SignalRecord;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Escape the characters Telegram's legacy Markdown treats as entity markers.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn render(report: &ScanReport) -> String {
    let references = report
        .regime
        .references
        .iter()
        .map(|r| format!("{}: {}", escape_markdown(&r.label), r.state))
        .collect::<Vec<_>>()
        .join(" | ");

    let mut parts = vec![format!(
        "🟢 *Daily Signals (1D)*\n⏱ {}\n{}\n{}",
        report.generated_at.format(TIMESTAMP_FORMAT),
        references,
        escape_markdown(&report.regime.narrative.to_string()),
    )];

    push_section(&mut parts, "\n🟢 *BUY:*", &report.longs);
    push_section(&mut parts, "\n🔴 *SELL:*", &report.shorts);
    if !report.has_signals() {
        parts.push("\nℹ️ No instruments currently meet the daily criteria.".to_string());
    }

    let s = &report.skipped;
    parts.push(format!(
        "\n📊 Summary: BUY:{} | SELL:{} | Skipped (liquidity:{}, gap:{}, volume:{}, history:{}) | Failed:{}",
        report.qualified_longs,
        report.qualified_shorts,
        s.illiquid,
        s.excessive_gap,
        s.no_volume_anomaly,
        s.insufficient_history,
        report.faults,
    ));

    parts.join("\n")
}

fn push_section(parts: &mut Vec<String>, header: &str, records: &[SignalRecord]) {
    if records.is_empty() {
        return;
    }
    parts.push(header.to_string());
    parts.extend(
        records
            .iter()
            .map(|r| format!("- {}", escape_markdown(r.summary()))),
    );
}

pub fn render_universe_unavailable() -> String {
    "⚠️ Instrument list unavailable; scan skipped.".to_string()
}
