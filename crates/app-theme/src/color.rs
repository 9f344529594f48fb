//! Hex RGB colors and conversion into HSL
//!
//! Colors arrive from the CMS as `#RRGGBB` strings. Parsing is strict: anything
//! other than six hex digits (with an optional leading `#`) is rejected with
//! [`ColorError::InvalidColorFormat`] instead of producing garbage CSS values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::hsl::Hsl;

/// Color parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input is not a `#RRGGBB` hex color
    #[error("Invalid color format {input:?}: {reason}")]
    InvalidColorFormat {
        /// The rejected input, verbatim
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl ColorError {
    fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidColorFormat {
            input: input.to_string(),
            reason,
        }
    }
}

/// An opaque sRGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` or `RRGGBB` string
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let (r, g, b) = parse_hex_color(hex)?;
        Ok(Self::new(r, g, b))
    }

    /// Uppercase `#RRGGBB` form
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Whether all three channels are equal (a gray)
    pub fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Convert to HSL, rounding hue to whole degrees and saturation/lightness
    /// to whole percent.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if self.is_achromatic() {
            return Hsl::new(0.0, 0.0, (l * 100.0).round());
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        // 359.5 and up rounds to 360, which is 0.
        let hue = (sector / 6.0 * 360.0).round().rem_euclid(360.0);

        Hsl::new(hue, (s * 100.0).round(), (l * 100.0).round())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

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
        write!(f, "{}", self.to_hex())
    }
}

/// Parse a hex color string to RGB components
pub fn parse_hex_color(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(ColorError::invalid(hex, "expected exactly 6 hex digits"));
    }
    // from_str_radix accepts a leading '+', so check the digits up front.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::invalid(hex, "contains non-hex characters"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::invalid(hex, "contains non-hex characters"))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Parse `hex` and convert it straight to HSL
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Color::from_hex(hex).map(Color::to_hsl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), (255, 255, 255));
        assert_eq!(parse_hex_color("#000000").unwrap(), (0, 0, 0));
        assert_eq!(parse_hex_color("#3E86B0").unwrap(), (62, 134, 176));
        assert_eq!(parse_hex_color("6b7280").unwrap(), (107, 114, 128));
    }

    #[test]
    fn test_parse_hex_color_rejects_bad_length() {
        for input in ["", "#", "#FFF", "#FFFFF", "#FFFFFFF", "#FFFFFF80", "##FFFFFF"] {
            let err = parse_hex_color(input).unwrap_err();
            assert!(
                matches!(err, ColorError::InvalidColorFormat { .. }),
                "expected rejection for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_hex_color_rejects_non_hex() {
        assert!(parse_hex_color("#GGGGGG").is_err());
        assert!(parse_hex_color("#+1+1+1").is_err());
        assert!(parse_hex_color("#12 456").is_err());
        // Multi-byte characters must not panic on slicing.
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn test_error_message_names_input() {
        let err = Color::from_hex("#12345").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid color format \"#12345\": expected exactly 6 hex digits"
        );
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(255, 255, 255), "#FFFFFF");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(62, 134, 176), "#3E86B0");
    }

    #[test]
    fn test_display_is_uppercase() {
        let color: Color = "#3e86b0".parse().unwrap();
        assert_eq!(color.to_string(), "#3E86B0");
    }

    #[test]
    fn test_to_hsl_brand_colors() {
        assert_eq!(hex_to_hsl("#3E86B0").unwrap(), Hsl::new(202.0, 48.0, 47.0));
        assert_eq!(hex_to_hsl("#6B7280").unwrap(), Hsl::new(220.0, 9.0, 46.0));
        assert_eq!(hex_to_hsl("#015A86").unwrap(), Hsl::new(200.0, 99.0, 26.0));
    }

    #[test]
    fn test_to_hsl_primaries() {
        assert_eq!(hex_to_hsl("#FF0000").unwrap(), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#00FF00").unwrap(), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#0000FF").unwrap(), Hsl::new(240.0, 100.0, 50.0));
        assert_eq!(hex_to_hsl("#FF00FF").unwrap(), Hsl::new(300.0, 100.0, 50.0));
    }

    #[test]
    fn test_to_hsl_achromatic() {
        let gray = hex_to_hsl("#808080").unwrap();
        assert_eq!(gray.saturation, 0.0);
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.lightness, 50.0);

        assert_eq!(hex_to_hsl("#FFFFFF").unwrap(), Hsl::new(0.0, 0.0, 100.0));
        assert_eq!(hex_to_hsl("#000000").unwrap(), Hsl::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_hsl_hue_wraps_to_zero() {
        // Raw hue is ~359.8 degrees and must not round to 360.
        let hsl = hex_to_hsl("#FF0001").unwrap();
        assert_eq!(hsl.hue, 0.0);
    }

    #[test]
    fn test_serde_as_string() {
        let color = Color::new(62, 134, 176);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#3E86B0\"");

        let parsed: Color = serde_json::from_str("\"3e86b0\"").unwrap();
        assert_eq!(parsed, color);

        assert!(serde_json::from_str::<Color>("\"#3E86B\"").is_err());
    }
}
