//! HSL triples in the CSS custom property convention (`"H S% L%"`)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;

/// Hue in degrees, saturation and lightness in percent.
///
/// Values produced by [`Color::to_hsl`] are always whole numbers; the
/// foreground constants carry a single decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hsl {
    /// Hue, `[0, 360)`
    pub hue: f64,
    /// Saturation, `[0, 100]`
    pub saturation: f64,
    /// Lightness, `[0, 100]`
    pub lightness: f64,
}

impl Hsl {
    /// Create an HSL triple
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Shift lightness by `delta` percent, clamped to `[0, 100]`
    pub fn adjust_lightness(self, delta: i32) -> Self {
        Self {
            lightness: (self.lightness + f64::from(delta)).clamp(0.0, 100.0),
            ..self
        }
    }

    /// Whether every component lies in its valid range
    pub fn in_range(&self) -> bool {
        (0.0..360.0).contains(&self.hue)
            && (0.0..=100.0).contains(&self.saturation)
            && (0.0..=100.0).contains(&self.lightness)
    }

    /// Convert back to an RGB color, rounding each channel
    pub fn to_color(self) -> Color {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = self.saturation.clamp(0.0, 100.0) / 100.0;
        let l = self.lightness.clamp(0.0, 100.0) / 100.0;

        if s == 0.0 {
            let v = to_channel(l);
            return Color::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Color::new(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.hue, self.saturation, self.lightness)
    }
}

impl From<Color> for Hsl {
    fn from(color: Color) -> Self {
        color.to_hsl()
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        hsl.to_color()
    }
}

/// Convert HSL to an uppercase `#RRGGBB` string
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_color().to_hex()
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
