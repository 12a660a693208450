//! Loosely-typed user input accepted by the time and frame-rate parsers.
//!
//! Values arrive either as numbers (library callers) or as text (CLI flags,
//! ffprobe output), and may be missing altogether.

/// A raw value handed to [`crate::parse_time`] or [`crate::parse_fraction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// A numeric value, passed through after range checks.
    Number(f64),
    /// Text that still has to be parsed.
    Text(&'a str),
    /// No value supplied.
    Absent,
}

impl RawValue<'_> {
    /// Renders the value for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => (*s).to_string(),
            RawValue::Absent => "<none>".to_string(),
        }
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for RawValue<'a>
where
    T: Into<RawValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

/// Parses the longest leading numeric prefix of `text`.
///
/// Accepts optional leading whitespace, an optional sign, digits with an
/// optional fractional part and an optional exponent, or `Infinity`.
/// Trailing garbage is ignored, so `"30/0"` parses as `30.0` and `"abc"`
/// yields `None`.
#[must_use]
pub fn parse_numeric_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
