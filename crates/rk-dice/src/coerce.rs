//! Integer coercion shared by every boundary of the engine.
//!
//! Values coming from character data or hand-edited strings are never
//! trusted to be finite, integral, or non-negative. These helpers collapse
//! anything degenerate to `0` instead of failing.

/// Convert a float to an integer, truncating toward zero.
///
/// NaN and infinities become `0`. Values outside the `i64` range saturate.
pub fn to_int(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Clamp a signed value into a dice count (`>= 0`).
pub fn to_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Read the leading signed integer of a string.
///
/// Leading whitespace and a single `+`/`-` sign are accepted; parsing stops
/// at the first non-digit. Returns `None` when no digit follows.
///
/// ```
/// use rk_dice::coerce::leading_int;
///
/// assert_eq!(leading_int("12+4"), Some(12));
/// assert_eq!(leading_int(" -3x10"), Some(-3));
/// assert_eq!(leading_int("x10"), None);
/// ```
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Overlong digit runs saturate rather than fail.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// The leading integer of a string, or `0` when there is none.
pub fn int_or_zero(s: &str) -> i64 {
    leading_int(s).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_int_truncates() {
        assert_eq!(to_int(3.9), 3);
        assert_eq!(to_int(-3.9), -3);
        assert_eq!(to_int(0.0), 0);
    }

    #[test]
    fn to_int_non_finite_is_zero() {
        assert_eq!(to_int(f64::NAN), 0);
        assert_eq!(to_int(f64::INFINITY), 0);
        assert_eq!(to_int(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn to_count_clamps() {
        assert_eq!(to_count(-4), 0);
        assert_eq!(to_count(7), 7);
        assert_eq!(to_count(i64::MAX), u32::MAX);
    }

    #[test]
    fn leading_int_variants() {
        assert_eq!(leading_int("6"), Some(6));
        assert_eq!(leading_int("+4u"), Some(4));
        assert_eq!(leading_int("-2"), Some(-2));
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("k3"), None);
    }

    #[test]
    fn leading_int_saturates() {
        assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn int_or_zero_defaults() {
        assert_eq!(int_or_zero("abc"), 0);
        assert_eq!(int_or_zero("10x"), 10);
    }
}
