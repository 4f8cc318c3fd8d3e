//! Fixed-point rounding used for every rate and conversion result.

/// Scaled values at or beyond this magnitude have no fractional part left to round.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Rounds `value` to `precision` fractional digits, half away from zero.
///
/// A precision below 1 is treated as 1. When scaling would overflow or leave
/// the exactly representable integer range, `value` is returned as is since it
/// carries no representable digits past the requested precision.
pub fn to_fixed(value: f64, precision: i32) -> f64 {
    let precision = precision.max(1);
    let factor = 10f64.powi(precision);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    scaled.round() / factor
}

/// Clamps an unsigned client precision into the signed range [`to_fixed`] accepts.
pub(crate) fn precision_digits(precision: u32) -> i32 {
    i32::try_from(precision).unwrap_or(i32::MAX)
}
