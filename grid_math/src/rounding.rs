//! Rounding rules applied to published figures

/// Round `value` to `decimals` decimal places, half away from zero.
///
/// ```
/// use grid_math::round_to;
///
/// assert_eq!(round_to(95.456, 2), 95.46);
/// assert_eq!(round_to(-1.005, 0), -1.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;

    // Past 2^52 every f64 is already an integer at this scale
    if scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }

    scaled.round() / factor
}

/// Round to two decimal places, the precision of every published metric
pub fn round_to_cents(value: f64) -> f64 {
    round_to(value, 2)
}
