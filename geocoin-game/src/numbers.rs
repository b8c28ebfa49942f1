//! Numeric conversion helpers centralizing float-to-integer casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    cast::<f64, i32>(value.round().clamp(min, max)).unwrap_or(0)
}

/// Floor a non-negative f64 into `0..max`, returning 0 for non-finite or
/// negative input.
#[must_use]
pub fn floor_below(value: f64, max: u32) -> u32 {
    if !value.is_finite() || value <= 0.0 || max == 0 {
        return 0;
    }
    cast::<f64, u32>(value.floor())
        .unwrap_or(u32::MAX)
        .min(max - 1)
}
