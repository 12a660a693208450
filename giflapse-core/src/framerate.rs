//! Frame rate parsing.
//!
//! ffprobe reports rates as rationals (`30000/1001`); users and older tools
//! hand over plain numbers. Parsing never fails: anything without a numeric
//! reading comes back as `None` and the caller picks a default.

use crate::input::{RawValue, parse_numeric_prefix};

/// Parses a frame rate expression into frames per second.
///
/// A string with exactly one `/` is treated as `numerator/denominator`.
/// When either side is not numeric or the denominator is zero, the whole
/// string is parsed as a plain number instead, using its leading numeric
/// prefix. That is why `"30/0"` yields `30.0`.
///
/// # Examples
///
/// ```
/// use giflapse_core::parse_fraction;
///
/// assert_eq!(parse_fraction("24/1"), Some(24.0));
/// assert_eq!(parse_fraction("30/0"), Some(30.0));
/// assert_eq!(parse_fraction("abc"), None);
/// assert_eq!(parse_fraction(None::<&str>), None);
/// ```
#[must_use]
pub fn parse_fraction<'a>(input: impl Into<RawValue<'a>>) -> Option<f64> {
    match input.into() {
        RawValue::Number(value) => (!value.is_nan()).then_some(value),
        RawValue::Text(text) => parse_fraction_text(text),
        RawValue::Absent => None,
    }
}

fn parse_fraction_text(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        return None;
    }

    if text.matches('/').count() == 1 {
        if let Some((num, den)) = text.split_once('/') {
            let numerator = parse_numeric_prefix(num);
            let denominator = parse_numeric_prefix(den);
            if let (Some(n), Some(d)) = (numerator, denominator) {
                if d != 0.0 {
                    return Some(n / d);
                }
            }
            log::trace!("Fraction '{text}' not usable as a ratio, parsing as plain number");
        }
    }

    parse_numeric_prefix(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ntsc_rate() {
        let fps = parse_fraction("30000/1001").unwrap();
        assert!((fps - 29.97).abs() < 0.01, "got {fps}");
    }

    #[test]
    fn test_integer_ratios() {
        assert_eq!(parse_fraction("24/1"), Some(24.0));
        assert_eq!(parse_fraction("60/2"), Some(30.0));
        assert_eq!(parse_fraction("25"), Some(25.0));
        assert_eq!(parse_fraction("23.976"), Some(23.976));
    }

    #[test]
    fn test_zero_denominator_falls_back_to_prefix() {
        assert_eq!(parse_fraction("30/0"), Some(30.0));
        assert_eq!(parse_fraction("0/0"), Some(0.0));
    }

    #[test]
    fn test_non_numeric_parts_fall_back() {
        assert_eq!(parse_fraction("25/x"), Some(25.0));
        assert_eq!(parse_fraction("x/25"), None);
        assert_eq!(parse_fraction("1/2/3"), Some(1.0));
    }

    #[test]
    fn test_absent_and_garbage() {
        assert_eq!(parse_fraction("abc"), None);
        assert_eq!(parse_fraction(""), None);
        assert_eq!(parse_fraction(None::<&str>), None);
        assert_eq!(parse_fraction(RawValue::Absent), None);
    }

    #[test]
    fn test_numeric_input() {
        assert_eq!(parse_fraction(29.97), Some(29.97));
        assert_eq!(parse_fraction(60u32), Some(60.0));
        assert_eq!(parse_fraction(f64::NAN), None);
    }
}
