use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Straight (non-premultiplied) RGBA color; alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognised color '{0}'")]
pub struct ColorParseError(pub String);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Linear blend towards `other`; channels rounded, alpha kept fractional.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |from: u8, to: u8| {
            let value = (f64::from(to) - f64::from(from)).mul_add(t, f64::from(from));
            value.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: (other.a - self.a).mul_add(t, self.a),
        }
    }

    /// Color as seen over an opaque black background, brightened by `lift`
    /// so faint layers stay visible on coarse displays.
    pub fn over_black(self, lift: f64) -> (u8, u8, u8) {
        let coverage = (self.a * lift).clamp(0.0, 1.0);
        let scale = |channel: u8| (f64::from(channel) * coverage).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alpha = (self.a.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0;
        write!(f, "rgba({},{},{},{alpha})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let error = || ColorParseError(input.to_string());

        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(error);
        }

        let lower = text.to_ascii_lowercase();
        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .ok_or_else(error)?;
        // Open prefixes such as "rgba(0,198,169," carry no alpha; the renderer
        // supplies it per draw.
        let body = body.strip_suffix(')').unwrap_or(body);
        let parts: Vec<&str> = body
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < 3 || parts.len() > 4 {
            return Err(error());
        }

        let channel = |part: &str| -> Result<u8, ColorParseError> {
            let value: f64 = part.parse().map_err(|_| error())?;
            Ok(value.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = match parts.get(3) {
            Some(part) => part
                .parse::<f64>()
                .map_err(|_| error())?
                .clamp(0.0, 1.0),
            None => 1.0,
        };

        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: alpha,
        })
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let nibble = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
    let byte = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();
    match hex.len() {
        3 => Some(Rgba::new(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            1.0,
        )),
        6 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        _ => None,
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}
