/// Loosely typed numeric input from a host API (JS values, CLI text).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericInput<'a> {
    Number(f64),
    Text(&'a str),
    Bool(bool),
    Missing,
}

impl NumericInput<'_> {
    /// Coerces the way unary `+` does, except that anything non-finite
    /// (NaN, ±Infinity) becomes `0.0`.
    pub fn coerce(self) -> f64 {
        let value = match self {
            Self::Number(value) => value,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    radix_literal(trimmed).unwrap_or_else(|| trimmed.parse().unwrap_or(0.0))
                }
            }
            Self::Bool(flag) => f64::from(u8::from(flag)),
            Self::Missing => 0.0,
        };
        finite_or_zero(value)
    }
}

/// Unsigned `0x`/`0o`/`0b` integer literals, case-insensitive. Signed forms
/// are not numbers to unary `+`, so they fall through and fail to parse.
fn radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc.mul_add(f64::from(radix), f64::from(digit))),
    )
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
