//! Unit tests for numeric helpers

use trendscan::common::math::{
    diff, max_finite, mean, min_finite, safe_div, smooth, span_alpha, true_range, wilder_alpha,
};

#[test]
fn test_safe_div_zero_denominator_is_finite() {
    let result = safe_div(1.0, 0.0);
    assert!(result.is_finite());
    assert!(result > 1e11);
}

#[test]
fn test_safe_div_regular_values() {
    assert!((safe_div(10.0, 4.0) - 2.5).abs() < 1e-9);
}

#[test]
fn test_smooth_seeds_with_first_finite_value() {
    let out = smooth(&[f64::NAN, 1.0, 2.0], 0.5);
    assert!(out[0].is_nan());
    assert_eq!(out[1], 1.0);
    assert!((out[2] - 1.5).abs() < 1e-12);
}

#[test]
fn test_smooth_propagates_nan_after_seed() {
    let out = smooth(&[1.0, f64::NAN, 2.0], 0.5);
    assert_eq!(out[0], 1.0);
    assert!(out[1].is_nan());
    assert!(out[2].is_nan());
}

#[test]
fn test_smooth_empty_input() {
    assert!(smooth(&[], 0.5).is_empty());
}

#[test]
fn test_alphas() {
    assert!((span_alpha(9) - 0.2).abs() < 1e-12);
    assert!((wilder_alpha(14) - 1.0 / 14.0).abs() < 1e-12);
    assert_eq!(wilder_alpha(0), 1.0);
}

#[test]
fn test_diff_first_element_is_nan() {
    let out = diff(&[1.0, 3.0, 6.0]);
    assert!(out[0].is_nan());
    assert_eq!(&out[1..], &[2.0, 3.0]);
}

#[test]
fn test_mean() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

#[test]
fn test_true_range_uses_previous_close() {
    assert_eq!(true_range(10.0, 8.0, Some(12.0)), 4.0);
    assert_eq!(true_range(10.0, 8.0, Some(5.0)), 5.0);
    assert_eq!(true_range(10.0, 8.0, None), 2.0);
}

#[test]
fn test_extremes_skip_nan() {
    assert_eq!(max_finite([f64::NAN, 1.0, 3.0]), Some(3.0));
    assert_eq!(min_finite([2.0, f64::NAN, -1.0]), Some(-1.0));
    assert_eq!(max_finite(Vec::<f64>::new()), None);
    assert_eq!(min_finite([f64::NAN]), None);
}
