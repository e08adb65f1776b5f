//! Display line attached to each signal record

use crate::models::indicators::IndicatorSnapshot;

/// `SYM | Trend:↑ | RSI:61.2 | Vol x3.05 | ADX:34 | BoS:↑ | Price:1.234[ | Funding:+0.012]`
pub fn summary_line(symbol: &str, snapshot: &IndicatorSnapshot, funding: Option<f64>) -> String {
    let trend = if snapshot.trend_up() { "↑" } else { "↓" };
    let bos = if snapshot.breakout.up {
        "↑"
    } else if snapshot.breakout.down {
        "↓"
    } else {
        "-"
    };

    let mut line = format!(
        "{} | Trend:{} | RSI:{:.1} | Vol x{:.2} | ADX:{:.0} | BoS:{} | Price:{}",
        symbol,
        trend,
        snapshot.rsi.value,
        snapshot.volume.ratio(),
        snapshot.adx.value,
        bos,
        snapshot.close,
    );
    if let Some(rate) = funding {
        line.push_str(&funding_annotation(rate));
    }
    line
}

/// ` | Funding:+0.012` / ` | Funding:-0.012`
pub fn funding_annotation(rate: f64) -> String {
    format!(" | Funding:{:+.3}", rate)
}
