use crate::color::Color;
use crate::error::ThemeResult;
use serde::{Deserialize, Serialize};

/// One named, selectable theme as stored in the theme list file.
///
/// Equality and hashing cover all five fields. Upsert identity is the name
/// alone, see [`ThemeConfig::same_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub theme_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub bottom_background: String,
}

impl ThemeConfig {
    pub fn new(name: impl Into<String>, colors: &ThemeColors) -> Self {
        Self {
            theme_name: name.into(),
            primary_color: colors.primary.clone(),
            accent_color: colors.accent.clone(),
            background_color: colors.background.clone(),
            bottom_background: colors.bottom_background.clone(),
        }
    }

    /// Exact, case-sensitive name match.
    pub fn same_name(&self, other: &ThemeConfig) -> bool {
        self.theme_name == other.theme_name
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            primary: self.primary_color.clone(),
            accent: self.accent_color.clone(),
            background: self.background_color.clone(),
            bottom_background: self.bottom_background.clone(),
        }
    }
}

/// Four color strings in `#RRGGBB` form, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub bottom_background: String,
}

impl ThemeColors {
    /// Parse all four colors, failing on the first malformed one.
    pub fn parse(&self) -> ThemeResult<[Color; 4]> {
        Ok([
            Color::parse(&self.primary)?,
            Color::parse(&self.accent)?,
            Color::parse(&self.background)?,
            Color::parse(&self.bottom_background)?,
        ])
    }
}

/// Individually editable active colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Primary,
    Accent,
    Background,
    BottomBackground,
}

/// How the theme list was obtained when the repository was initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Read from the persisted file.
    Loaded,
    /// No file yet; the bundled defaults are in use.
    Missing,
    /// The file could not be parsed; the bundled defaults are in use and the
    /// file is left untouched.
    Corrupt(String),
}

impl LoadOutcome {
    pub fn used_defaults(&self) -> bool {
        !matches!(self, LoadOutcome::Loaded)
    }
}
