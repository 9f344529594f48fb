//! Foreground selection for a background tone
//!
//! Readability is decided by a single lightness threshold: backgrounds lighter
//! than 50% get the dark constant, everything else gets the light constant.
//! Consumers rely on there being exactly two possible foregrounds per palette.

use serde::{Deserialize, Serialize};

use crate::hsl::Hsl;

/// Backgrounds strictly above this lightness get a dark foreground
pub const FOREGROUND_THRESHOLD: f64 = 50.0;

/// Dark slate text used on light backgrounds
pub const SLATE_DARK: Hsl = Hsl::new(222.2, 47.4, 11.2);

/// Near-white text used on dark backgrounds
pub const SLATE_LIGHT: Hsl = Hsl::new(210.0, 40.0, 98.0);

/// Pure black
pub const MONO_DARK: Hsl = Hsl::new(0.0, 0.0, 0.0);

/// Pure white
pub const MONO_LIGHT: Hsl = Hsl::new(0.0, 0.0, 100.0);

/// The pair of foreground constants a theme draws from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForegroundPalette {
    /// Tinted slate/near-white pair used for general UI text
    #[default]
    Slate,
    /// Plain black/white pair
    Mono,
}

impl ForegroundPalette {
    /// Foreground for light backgrounds
    pub const fn dark(self) -> Hsl {
        match self {
            Self::Slate => SLATE_DARK,
            Self::Mono => MONO_DARK,
        }
    }

    /// Foreground for dark backgrounds
    pub const fn light(self) -> Hsl {
        match self {
            Self::Slate => SLATE_LIGHT,
            Self::Mono => MONO_LIGHT,
        }
    }

    /// Pick the readable foreground for `background`
    pub fn foreground_for(self, background: Hsl) -> Hsl {
        if background.lightness > FOREGROUND_THRESHOLD {
            self.dark()
        } else {
            self.light()
        }
    }

    /// Whether `hsl` is one of this palette's two constants
    pub fn contains(self, hsl: Hsl) -> bool {
        hsl == self.dark() || hsl == self.light()
    }
}

/// [`ForegroundPalette::foreground_for`] with the default palette
pub fn foreground_for(background: Hsl) -> Hsl {
    ForegroundPalette::default().foreground_for(background)
}
