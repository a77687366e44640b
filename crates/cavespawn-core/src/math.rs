//! Small numeric helpers used by the distribution curves.

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: a NaN `value` yields `min`, and
/// if `min > max` the result is `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || value < min {
        min
    } else if value > max {
        max.max(min)
    } else {
        value
    }
}

/// Logarithm of `value` in an arbitrary `base`.
///
/// Follows IEEE semantics: `log_base(0.0, b)` is negative infinity for
/// `b > 1`, and a base of exactly 1 yields an infinite or NaN result.
/// Callers guard those cases themselves.
pub fn log_base(value: f64, base: f64) -> f64 {
    value.ln() / base.ln()
}
