//! Numeric primitives shared by every indicator.
//!
//! All divisions in the indicator library go through [`safe_div`] so a zero
//! or vanishing denominator yields a large-but-finite value instead of a
//! panic or an infinity.

/// Denominator guard added to every indicator division.
pub const EPSILON: f64 = 1e-12;

/// Divide `numerator` by `denominator + EPSILON`.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    numerator / (denominator + EPSILON)
}

/// Recursive exponential smoothing `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]`.
///
/// The recursion is seeded by the first finite input; leading NaNs stay NaN.
/// A NaN appearing after the seed propagates to every later output.
pub fn smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = match prev {
            None if value.is_nan() => f64::NAN,
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        if prev.is_some() || !value.is_nan() {
            prev = Some(next);
        }
        out.push(next);
    }

    out
}

/// Smoothing factor for a span-parameterised EMA.
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Smoothing factor for Wilder-style averaging.
pub fn wilder_alpha(period: usize) -> f64 {
    1.0 / period.max(1) as f64
}

/// First difference; the first element has no predecessor and is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i == 0 {
            out.push(f64::NAN);
        } else {
            out.push(values[i] - values[i - 1]);
        }
    }
    out
}

/// Arithmetic mean, `None` for an empty window.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Largest of `high - low`, `|high - prev_close|`, `|low - prev_close|`.
///
/// NaN candidates are skipped; without a previous close only the bar range
/// counts.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let range = high - low;
    match prev_close {
        Some(pc) => range
            .max((high - pc).abs())
            .max((low - pc).abs()),
        None => range,
    }
}

/// Maximum ignoring NaN, `None` if the window holds no finite value.
pub fn max_finite(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

/// Minimum ignoring NaN, `None` if the window holds no finite value.
pub fn min_finite(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
}
