//! Color values attached to displays by `\color` and `\textcolor`.

use core::fmt;
use core::str::FromStr;

use phf::{Map, phf_map};
use thiserror::Error;

/// An ARGB color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

/// Color names accepted in addition to hex notation.
static NAMED_COLORS: Map<&'static str, u32> = phf_map! {
    "black" => 0xFF00_0000,
    "white" => 0xFFFF_FFFF,
    "red" => 0xFFFF_0000,
    "green" => 0xFF00_FF00,
    "blue" => 0xFF00_00FF,
    "yellow" => 0xFFFF_FF00,
    "cyan" => 0xFF00_FFFF,
    "magenta" => 0xFFFF_00FF,
    "gray" => 0xFF88_8888,
};

/// Reason a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Hex notation with a digit count other than 3, 4, 6 or 8.
    #[error("Unknown color format: {0}")]
    UnknownFormat(String),
    /// Neither hex notation nor a known color name.
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// Expand each hex digit into a doubled byte, `"f0a"` into `0xff00aa`.
fn expand_short_hex(hex: &str) -> Option<u32> {
    hex.chars().try_fold(0u32, |acc, c| {
        let digit = c.to_digit(16)?;
        Some((acc << 8) | (digit << 4) | digit)
    })
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parses `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB` or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || ColorError::UnknownFormat(trimmed.to_owned());
        if let Some(hex) = trimmed.strip_prefix('#') {
            let value = match hex.len() {
                3 => 0xFF00_0000 | expand_short_hex(hex).ok_or_else(unknown)?,
                4 => expand_short_hex(hex).ok_or_else(unknown)?,
                6 => 0xFF00_0000 | u32::from_str_radix(hex, 16).map_err(|_| unknown())?,
                8 => u32::from_str_radix(hex, 16).map_err(|_| unknown())?,
                _ => return Err(unknown()),
            };
            return Ok(Self(value));
        }
        NAMED_COLORS
            .get(trimmed.to_ascii_lowercase().as_str())
            .map(|&value| Self(value))
            .ok_or_else(|| ColorError::UnknownName(trimmed.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
