/// Formats a float so that it always reads as a float.
///
/// Integral values keep a trailing `.0`, which keeps them visibly distinct
/// from `Int` values.
///
/// ## Example
/// ```
/// use blazescript::util::num::format_float;
///
/// assert_eq!(format_float(4.0), "4.0");
/// assert_eq!(format_float(2.5), "2.5");
/// assert_eq!(format_float(-0.125), "-0.125");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Raises `base` to a non-negative `exponent`.
///
/// ## Returns
/// - `Some(i64)`: The power if it fits in an `i64`.
/// - `None`: If the exponent is negative or the result overflows.
///
/// ## Example
/// ```
/// use blazescript::util::num::checked_int_pow;
///
/// assert_eq!(checked_int_pow(2, 10), Some(1024));
/// assert_eq!(checked_int_pow(2, -1), None);
/// assert_eq!(checked_int_pow(10, 30), None);
/// assert_eq!(checked_int_pow(1, 5_000_000_000), Some(1));
/// assert_eq!(checked_int_pow(-1, 5_000_000_001), Some(-1));
/// assert_eq!(checked_int_pow(0, 0), Some(1));
/// ```
#[must_use]
pub fn checked_int_pow(base: i64, exponent: i64) -> Option<i64> {
    if exponent < 0 {
        return None;
    }

    // These bases never overflow, whatever the exponent.
    match base {
        0 => Some(i64::from(exponent == 0)),
        1 => Some(1),
        -1 => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(exponent).ok().and_then(|exponent| base.checked_pow(exponent)),
    }
}
