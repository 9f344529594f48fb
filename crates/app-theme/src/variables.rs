//! Theme variable set assembly and CSS rendering
//!
//! Turns a [`ThemeSettings`] snapshot into the four CSS custom properties each
//! theme mode needs:
//!
//! ```text
//! primary/secondary Color
//!     │  Color::to_hsl
//!     ▼
//! raw Hsl ──adjust_lightness(mode offset)──▶ background Hsl
//!     │                                         │
//!     │                                         ▼
//!     │                             ForegroundPalette::foreground_for
//!     ▼
//! ModeVariables { primary, primary_foreground, secondary, secondary_foreground }
//! ```
//!
//! Disabled or absent settings produce no override at all; the static theme
//! stays in effect.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::foreground::ForegroundPalette;
use crate::hsl::Hsl;
use crate::settings::{ModeOffset, ThemeConfig, ThemeSettings};

/// Theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme, the document default
    Light,
    /// Dark theme, selected with `data-theme='dark'`
    Dark,
}

impl ThemeMode {
    /// Both modes in rendering order
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    /// CSS selector scoping this mode's variables
    pub fn selector(&self) -> &'static str {
        match self {
            ThemeMode::Light => ":root",
            ThemeMode::Dark => "[data-theme='dark']",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("Unknown theme mode: {}", s)),
        }
    }
}

/// The four color variables of one theme mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeVariables {
    /// `--primary`
    pub primary: Hsl,
    /// `--primary-foreground`
    pub primary_foreground: Hsl,
    /// `--secondary`
    pub secondary: Hsl,
    /// `--secondary-foreground`
    pub secondary_foreground: Hsl,
}

impl ModeVariables {
    fn derive(primary: Hsl, secondary: Hsl, offset: ModeOffset, palette: ForegroundPalette) -> Self {
        let primary = primary.adjust_lightness(offset.primary);
        let secondary = secondary.adjust_lightness(offset.secondary);

        Self {
            primary,
            primary_foreground: palette.foreground_for(primary),
            secondary,
            secondary_foreground: palette.foreground_for(secondary),
        }
    }

    /// Custom property name/value pairs in declaration order
    pub fn declarations(&self) -> [(&'static str, Hsl); 4] {
        [
            ("--primary", self.primary),
            ("--primary-foreground", self.primary_foreground),
            ("--secondary", self.secondary),
            ("--secondary-foreground", self.secondary_foreground),
        ]
    }
}

/// Light and dark variable sets derived from one brand color pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeVariableSet {
    /// Variables for the light theme
    pub light: ModeVariables,
    /// Variables for the dark theme
    pub dark: ModeVariables,
}

impl ThemeVariableSet {
    /// Variables for `mode`
    pub fn get(&self, mode: ThemeMode) -> &ModeVariables {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Render as CSS: a `:root` rule then a `[data-theme='dark']` rule
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (i, mode) in ThemeMode::ALL.iter().enumerate() {
            if i > 0 {
                css.push('\n');
            }
            // Writing to a String cannot fail.
            let _ = writeln!(css, "{} {{", mode.selector());
            for (name, value) in self.get(*mode).declarations() {
                let _ = writeln!(css, "  {}: {};", name, value);
            }
            css.push_str("}\n");
        }
        css
    }
}

/// Derives theme variables using a fixed [`ThemeConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeBuilder {
    config: ThemeConfig,
}

impl ThemeBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: ThemeConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Derive the variable set, or `None` when custom colors are off
    pub fn build(&self, settings: Option<&ThemeSettings>) -> Option<ThemeVariableSet> {
        let settings = match settings {
            Some(settings) if settings.custom_colors => settings,
            Some(_) => {
                tracing::debug!("Custom colors disabled, keeping static theme");
                return None;
            }
            None => {
                tracing::debug!("No theme settings available, keeping static theme");
                return None;
            }
        };

        let primary_color = settings.primary_or(&self.config);
        let secondary_color = settings.secondary_or(&self.config);
        let primary = primary_color.to_hsl();
        let secondary = secondary_color.to_hsl();
        let offsets = self.config.offsets;
        let palette = self.config.foreground;

        tracing::debug!(
            primary = %primary_color,
            secondary = %secondary_color,
            "Deriving custom theme variables"
        );

        Some(ThemeVariableSet {
            light: ModeVariables::derive(primary, secondary, offsets.light, palette),
            dark: ModeVariables::derive(primary, secondary, offsets.dark, palette),
        })
    }

    /// Derive and render as CSS; empty when custom colors are off
    pub fn build_css(&self, settings: Option<&ThemeSettings>) -> String {
        self.build(settings)
            .map(|set| set.to_css())
            .unwrap_or_default()
    }
}

/// [`ThemeBuilder::build`] with the default configuration
pub fn build_theme_variable_set(settings: Option<&ThemeSettings>) -> Option<ThemeVariableSet> {
    ThemeBuilder::default().build(settings)
}

/// [`ThemeBuilder::build_css`] with the default configuration
pub fn build_theme_css(settings: Option<&ThemeSettings>) -> String {
    ThemeBuilder::default().build_css(settings)
}
