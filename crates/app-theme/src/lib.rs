//! Brand color theming for Optimist
//!
//! Administrators pick two brand colors in the CMS. This crate derives the
//! full set of light and dark CSS custom properties from that pair, so the
//! rest of the application only has to inject the resulting stylesheet.
//!
//! # Modules
//!
//! - [`color`] - hex color parsing and RGB → HSL conversion
//! - [`hsl`] - HSL triples, lightness adjustment, HSL → RGB
//! - [`foreground`] - readable foreground selection
//! - [`settings`] - CMS settings snapshot and derivation configuration
//! - [`variables`] - variable set assembly and CSS rendering
//!
//! # Example
//!
//! ```rust
//! use app_theme::{build_theme_css, ThemeSettings};
//!
//! let settings = ThemeSettings::custom("#3E86B0".parse()?, "#6B7280".parse()?);
//! let css = build_theme_css(Some(&settings));
//! assert!(css.starts_with(":root {"));
//! assert!(css.contains("--primary: 202 48% 42%;"));
//!
//! // Disabled settings leave the static theme alone.
//! assert!(build_theme_css(Some(&ThemeSettings::disabled())).is_empty());
//! # Ok::<(), app_theme::ColorError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod foreground;
pub mod hsl;
pub mod settings;
pub mod variables;

pub use color::{hex_to_hsl, parse_hex_color, rgb_to_hex, Color, ColorError};
pub use foreground::{foreground_for, ForegroundPalette};
pub use hsl::{hsl_to_hex, Hsl};
pub use settings::{
    ModeOffset, ModeOffsets, SettingsError, ThemeConfig, ThemeSettings, ALT_PRIMARY_COLOR,
    DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};
pub use variables::{
    build_theme_css, build_theme_variable_set, ModeVariables, ThemeBuilder, ThemeMode,
    ThemeVariableSet,
};
