use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Calendars and tags carry colors as `#RRGGBB` hex strings at the boundary,
/// so that is also the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    /// Fallback used for events whose calendar cannot be resolved.
    pub const DEFAULT_EVENT: Self = Self::from_rgb8(0x3B, 0x82, 0xF6);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn from_hex(input: &str) -> CalendarResult<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(CalendarError::InvalidData(format!(
                "color `{input}` must be a #RRGGBB hex value"
            )));
        }
        // `from_str_radix` alone would accept a leading sign in each pair.
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(CalendarError::InvalidData(format!(
                "color `{input}` has a non-hex digit"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| {
                CalendarError::InvalidData(format!("color `{input}` has a non-hex digit"))
            })
        };

        let (red, green, blue) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
        Ok(Self::from_rgb8(red, green, blue))
    }

    /// Formats as uppercase `#RRGGBB`; alpha is not part of the hex form.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    pub fn validate(self) -> CalendarResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CalendarError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT_EVENT
    }
}

impl FromStr for Color {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_parsing_accepts_optional_hash_and_lowercase() {
        let a = Color::from_hex("#3b82f6").expect("valid");
        let b = Color::from_hex("3B82F6").expect("valid");
        assert_eq!(a, b);
        assert_eq!(a, Color::DEFAULT_EVENT);
        assert_eq!(a.to_hex(), "#3B82F6");
    }

    #[test]
    fn hex_parsing_rejects_short_and_non_hex_input() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn hex_parsing_rejects_signed_pairs() {
        assert!(Color::from_hex("#+1+2+3").is_err());
        assert!(Color::from_hex("+1+2+3").is_err());
        assert!(Color::from_hex("#-10000").is_err());
    }
}
