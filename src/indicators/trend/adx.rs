//! ADX-style trend strength from directional movement

use crate::common::math;
use crate::models::indicators::{AdxIndicator, Candle};

/// Smoothed directional-movement components, one entry per bar.
#[derive(Debug, Clone, Default)]
pub struct DirectionalSeries {
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub adx: Vec<f64>,
}

/// Directional strength series.
///
/// +DM counts an up-move only when it is positive and larger than the
/// down-move (and vice versa for -DM). True range, +DM and -DM are smoothed
/// with factor `1 / period`; `DX = 100 * |+DI - -DI| / (+DI + -DI)` and the
/// returned strength is DX smoothed once more with the same factor.
pub fn adx(candles: &[Candle], period: usize) -> DirectionalSeries {
    let n = candles.len();
    let mut tr_values = Vec::with_capacity(n);
    let mut plus_dm_values = Vec::with_capacity(n);
    let mut minus_dm_values = Vec::with_capacity(n);

    for i in 0..n {
        let prev = if i > 0 { Some(&candles[i - 1]) } else { None };

        let (plus_dm, minus_dm) = match prev {
            Some(p) => {
                let up = candles[i].high - p.high;
                let down = p.low - candles[i].low;
                let plus = if up > down && up > 0.0 { up } else { 0.0 };
                let minus = if down > up && down > 0.0 { down } else { 0.0 };
                (plus, minus)
            }
            None => (0.0, 0.0),
        };
        plus_dm_values.push(plus_dm);
        minus_dm_values.push(minus_dm);

        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            prev.map(|p| p.close),
        ));
    }

    let alpha = math::wilder_alpha(period);
    let atr = math::smooth(&tr_values, alpha);
    let plus_avg = math::smooth(&plus_dm_values, alpha);
    let minus_avg = math::smooth(&minus_dm_values, alpha);

    let plus_di: Vec<f64> = plus_avg
        .iter()
        .zip(&atr)
        .map(|(dm, tr)| 100.0 * math::safe_div(*dm, *tr))
        .collect();
    let minus_di: Vec<f64> = minus_avg
        .iter()
        .zip(&atr)
        .map(|(dm, tr)| 100.0 * math::safe_div(*dm, *tr))
        .collect();

    let dx: Vec<f64> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| 100.0 * math::safe_div((p - m).abs(), p + m))
        .collect();

    DirectionalSeries {
        adx: math::smooth(&dx, alpha),
        plus_di,
        minus_di,
    }
}

/// Calculate trend strength at the latest bar
pub fn calculate_adx(candles: &[Candle], period: u32) -> Option<AdxIndicator> {
    let series = adx(candles, period as usize);

    Some(AdxIndicator {
        value: *series.adx.last()?,
        plus_di: *series.plus_di.last()?,
        minus_di: *series.minus_di.last()?,
        period,
    })
}

/// Calculate trend strength with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> Option<AdxIndicator> {
    calculate_adx(candles, 14)
}
