//! Color types and color token parsing.
//!
//! Curve colors arrive as tokens from the UI: a CSS-style name or a
//! `#rrggbb` hex string as produced by an HTML color input.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// `#rrggbb` form (alpha is not encoded).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string, `rgb(...)` when opaque and `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

/// Parse a color token: a named color or `#rrggbb`.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for unknown names or malformed hex.
pub fn parse_color(s: &str) -> Result<Rgba> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "red" => Ok(Rgba::RED),
        "green" => Ok(Rgba::GREEN),
        "blue" => Ok(Rgba::BLUE),
        "black" => Ok(Rgba::BLACK),
        "white" => Ok(Rgba::WHITE),
        "yellow" => Ok(Rgba::rgb(255, 255, 0)),
        "cyan" => Ok(Rgba::rgb(0, 255, 255)),
        "magenta" => Ok(Rgba::rgb(255, 0, 255)),
        "orange" => Ok(Rgba::rgb(255, 165, 0)),
        "purple" => Ok(Rgba::rgb(128, 0, 128)),
        "pink" => Ok(Rgba::rgb(255, 192, 203)),
        "gray" | "grey" => Ok(Rgba::rgb(128, 128, 128)),
        _ if s.starts_with('#') && s.len() == 7 && s[1..].bytes().all(|b| b.is_ascii_hexdigit()) => {
            let channel = |range: std::ops::Range<usize>| {
                s.get(range)
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .ok_or_else(|| Error::InvalidColor(format!("invalid hex color: {s}")))
            };
            Ok(Rgba::rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
        }
        _ => Err(Error::InvalidColor(format!("unknown color: {s}"))),
    }
}
