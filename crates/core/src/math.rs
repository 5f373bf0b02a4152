//! Arithmetic helpers with explicit zero handling.
//!
//! Reports and insights divide by counts and costs that can legitimately be zero.
//! Those cases are defined to yield `0.0` instead of `NaN`/`inf`.

/// `numerator / denominator`, or `0.0` when the denominator is zero or the
/// result is not finite.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() { value } else { 0.0 }
}

/// Arithmetic mean of `values`; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum::<f64>(), values.len() as f64)
}
