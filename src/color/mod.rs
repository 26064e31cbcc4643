//! Colors used by the tokenizer and renderer.
//!
//! - [`Rgba`]: a plain 4-byte color value
//! - [`table`]: the fixed ANSI and 256-color lookup tables
//! - [`parse_color_option`]: resolves `--foreground`/`--background` values

pub mod table;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub use table::{ansi_color, palette256};

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const MAGENTA: Rgba = Rgba::rgb(255, 0, 255);
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(211, 211, 211);
    pub const DARK_GRAY: Rgba = Rgba::rgb(169, 169, 169);
    pub const LIGHT_RED: Rgba = Rgba::rgb(255, 144, 144);
    pub const LIGHT_GREEN: Rgba = Rgba::rgb(144, 238, 144);
    pub const LIGHT_YELLOW: Rgba = Rgba::rgb(255, 255, 224);
    pub const LIGHT_BLUE: Rgba = Rgba::rgb(173, 216, 230);
    pub const LIGHT_MAGENTA: Rgba = Rgba::rgb(255, 224, 255);
    pub const LIGHT_CYAN: Rgba = Rgba::rgb(224, 255, 255);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Look up one of the eight basic color names (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "yellow" => Some(Self::YELLOW),
            "blue" => Some(Self::BLUE),
            "magenta" => Some(Self::MAGENTA),
            "cyan" => Some(Self::CYAN),
            "white" => Some(Self::WHITE),
            _ => None,
        }
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color_option(s)
    }
}

/// Resolve a color option value.
///
/// Accepts either a basic color name (`black`, `red`, `green`, `yellow`,
/// `blue`, `magenta`, `cyan`, `white`) or a comma separated `R,G,B,A`
/// quadruple of integers in `0..=255`.
pub fn parse_color_option(value: &str) -> Result<Rgba, Error> {
    if let Some(color) = Rgba::from_name(value) {
        return Ok(color);
    }

    let parts: Vec<&str> = value.split(',').collect();
    let [r, g, b, a] = parts.as_slice() else {
        return Err(Error::ColorFormat(value.to_string()));
    };

    let channel = |s: &str| {
        s.parse::<u8>()
            .map_err(|_| Error::ColorFormat(value.to_string()))
    };
    Ok(Rgba::new(channel(*r)?, channel(*g)?, channel(*b)?, channel(*a)?))
}
