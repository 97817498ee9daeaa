use crate::error::{ThemeError, ThemeResult};
use std::fmt;

/// A 32-bit ARGB color as stored in the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

/// Darkness at or above this value makes a color "dark".
const DARKNESS_THRESHOLD: f64 = 0.4;

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);

    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#RRGGBB`, `#AARRGGBB` or a named color.
    ///
    /// Six-digit values are opaque. Names are matched case-insensitively.
    pub fn parse(input: &str) -> ThemeResult<Self> {
        let invalid = || ThemeError::ColorParse {
            value: input.to_string(),
        };

        if let Some(hex) = input.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return match hex.len() {
                6 => Ok(Color(0xFF00_0000 | value)),
                8 => Ok(Color(value)),
                _ => Err(invalid()),
            };
        }

        Self::named(&input.to_lowercase()).ok_or_else(invalid)
    }

    fn named(name: &str) -> Option<Self> {
        let argb = match name {
            "black" => 0xFF00_0000,
            "darkgray" | "darkgrey" => 0xFF44_4444,
            "gray" | "grey" => 0xFF88_8888,
            "lightgray" | "lightgrey" => 0xFFCC_CCCC,
            "white" => 0xFFFF_FFFF,
            "red" => 0xFFFF_0000,
            "green" | "lime" => 0xFF00_FF00,
            "blue" => 0xFF00_00FF,
            "yellow" => 0xFFFF_FF00,
            "cyan" | "aqua" => 0xFF00_FFFF,
            "magenta" | "fuchsia" => 0xFFFF_00FF,
            "maroon" => 0xFF80_0000,
            "navy" => 0xFF00_0080,
            "olive" => 0xFF80_8000,
            "purple" => 0xFF80_0080,
            "silver" => 0xFFC0_C0C0,
            "teal" => 0xFF00_8080,
            _ => return None,
        };
        Some(Color(argb))
    }

    /// Same color with the alpha channel forced to fully opaque.
    pub const fn opaque(self) -> Self {
        Color(self.0 | 0xFF00_0000)
    }

    /// `#RRGGBB` in uppercase, alpha dropped.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }

    /// Perceived darkness in `0.0..=1.0` using the Rec. 601 luma weights.
    pub fn darkness(self) -> f64 {
        let luma = 0.299 * f64::from(self.red())
            + 0.587 * f64::from(self.green())
            + 0.114 * f64::from(self.blue());
        1.0 - luma / 255.0
    }

    pub fn is_light(self) -> bool {
        self.darkness() < DARKNESS_THRESHOLD
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<Color> for i64 {
    fn from(color: Color) -> Self {
        i64::from(color.0)
    }
}

impl TryFrom<i64> for Color {
    type Error = ThemeError;

    /// Accepts both unsigned ARGB values and the signed form some stores keep.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if let Ok(argb) = u32::try_from(value) {
            return Ok(Color(argb));
        }
        i32::try_from(value)
            .map(|signed| Color(signed as u32))
            .map_err(|_| ThemeError::ColorParse {
                value: value.to_string(),
            })
    }
}
