//! Administrator theme settings and derivation configuration
//!
//! [`ThemeSettings`] is the snapshot read from the CMS global settings.
//! [`ThemeConfig`] holds everything the derivation needs beyond that snapshot:
//! fallback colors, per-mode lightness offsets, and the foreground palette.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::foreground::ForegroundPalette;

/// Default primary brand color
pub const DEFAULT_PRIMARY_COLOR: Color = Color::new(0x3E, 0x86, 0xB0);

/// Deeper primary used by some call sites as their fallback
pub const ALT_PRIMARY_COLOR: Color = Color::new(0x01, 0x5A, 0x86);

/// Default secondary brand color
pub const DEFAULT_SECONDARY_COLOR: Color = Color::new(0x6B, 0x72, 0x80);

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings JSON could not be decoded
    ///
    /// Malformed colors inside the snapshot are reported here as well.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Custom color settings as stored in the CMS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Whether the custom brand colors override the static theme
    #[serde(default, alias = "customColorsEnabled")]
    pub custom_colors: bool,

    /// Primary brand color, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<Color>,

    /// Secondary brand color, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Color>,
}

impl ThemeSettings {
    /// Enabled settings with both colors set
    pub fn custom(primary: Color, secondary: Color) -> Self {
        Self {
            custom_colors: true,
            primary_color: Some(primary),
            secondary_color: Some(secondary),
        }
    }

    /// Settings that leave the static theme in place
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Decode a settings snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Primary color, falling back to the configured default
    pub fn primary_or(&self, config: &ThemeConfig) -> Color {
        self.primary_color.unwrap_or(config.default_primary)
    }

    /// Secondary color, falling back to the configured default
    pub fn secondary_or(&self, config: &ThemeConfig) -> Color {
        self.secondary_color.unwrap_or(config.default_secondary)
    }
}

/// Lightness deltas applied to the raw brand colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOffset {
    /// Delta for the primary color
    pub primary: i32,
    /// Delta for the secondary color
    pub secondary: i32,
}

/// Lightness deltas for both theme modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeOffsets {
    /// Light mode darkens slightly
    pub light: ModeOffset,
    /// Dark mode lightens
    pub dark: ModeOffset,
}

impl Default for ModeOffsets {
    fn default() -> Self {
        Self {
            light: ModeOffset {
                primary: -5,
                secondary: 0,
            },
            dark: ModeOffset {
                primary: 10,
                secondary: 15,
            },
        }
    }
}

/// Theme derivation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Primary color used when the settings omit one
    pub default_primary: Color,
    /// Secondary color used when the settings omit one
    pub default_secondary: Color,
    /// Per-mode lightness offsets
    pub offsets: ModeOffsets,
    /// Foreground constant pair
    pub foreground: ForegroundPalette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_primary: DEFAULT_PRIMARY_COLOR,
            default_secondary: DEFAULT_SECONDARY_COLOR,
            offsets: ModeOffsets::default(),
            foreground: ForegroundPalette::default(),
        }
    }
}

impl ThemeConfig {
    /// Create a new theme configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback primary color
    pub fn default_primary(mut self, color: Color) -> Self {
        self.default_primary = color;
        self
    }

    /// Set the fallback secondary color
    pub fn default_secondary(mut self, color: Color) -> Self {
        self.default_secondary = color;
        self
    }

    /// Set the per-mode lightness offsets
    pub fn offsets(mut self, offsets: ModeOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Set the foreground palette
    pub fn foreground(mut self, palette: ForegroundPalette) -> Self {
        self.foreground = palette;
        self
    }
}
