//! Parsing of user-supplied start times.
//!
//! Accepts plain seconds (`"90"`, `"12.5"`), `MM:SS` and `HH:MM:SS`, or a
//! numeric value that is passed through unchanged. Upper bounds are not
//! checked here; the planner compares the result against the real video
//! duration.

use crate::error::{CoreError, CoreResult};
use crate::input::RawValue;

/// Maximum number of colon-delimited segments (`HH:MM:SS`).
const MAX_SEGMENTS: usize = 3;

/// Parses a time expression into a non-negative number of seconds.
///
/// # Errors
///
/// * [`CoreError::NegativeTime`] for negative numbers or negative segments
/// * [`CoreError::InvalidTimeFormat`] for missing, empty or malformed input
///   and for more than three segments
///
/// # Examples
///
/// ```
/// use giflapse_core::parse_time;
///
/// assert_eq!(parse_time("1:30").unwrap(), 90.0);
/// assert_eq!(parse_time("2:30:45").unwrap(), 9045.0);
/// assert_eq!(parse_time(12.5).unwrap(), 12.5);
/// assert!(parse_time("abc").is_err());
/// ```
pub fn parse_time<'a>(input: impl Into<RawValue<'a>>) -> CoreResult<f64> {
    let input = input.into();
    match input {
        RawValue::Number(value) => {
            if !value.is_finite() {
                Err(CoreError::InvalidTimeFormat(input.describe()))
            } else if value < 0.0 {
                Err(CoreError::NegativeTime(input.describe()))
            } else {
                Ok(value)
            }
        }
        RawValue::Text(text) => parse_time_text(text),
        RawValue::Absent => Err(CoreError::InvalidTimeFormat(input.describe())),
    }
}

fn parse_time_text(text: &str) -> CoreResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidTimeFormat(text.to_string()));
    }

    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.len() > MAX_SEGMENTS {
        return Err(CoreError::InvalidTimeFormat(text.to_string()));
    }

    // Most significant segment first: hours, minutes, seconds.
    segments.iter().try_fold(0.0, |total, segment| {
        let value = parse_segment(segment, text)?;
        Ok(total * 60.0 + value)
    })
}

fn parse_segment(segment: &str, original: &str) -> CoreResult<f64> {
    if let Some(rest) = segment.strip_prefix('-') {
        return if is_unsigned_decimal(rest) {
            Err(CoreError::NegativeTime(original.to_string()))
        } else {
            Err(CoreError::InvalidTimeFormat(original.to_string()))
        };
    }

    if !is_unsigned_decimal(segment) {
        return Err(CoreError::InvalidTimeFormat(original.to_string()));
    }

    segment
        .parse::<f64>()
        .map_err(|_| CoreError::InvalidTimeFormat(original.to_string()))
}

/// True for `12`, `1.5`, `.5` and `3.`; false for anything with letters,
/// signs, exponents or more than one dot.
fn is_unsigned_decimal(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
