use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default per-channel tolerance used when comparing colors for a fill.
pub const DEFAULT_TOLERANCE: u8 = 10;

/// An opaque RGB color.
///
/// Serializes as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RGB`, `#RRGGBB` or the same without the leading `#`.
    ///
    /// Returns `None` for anything else.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, digit) in channels.iter_mut().zip(hex.chars()) {
                    let value = digit.to_digit(16)? as u8;
                    *channel = value * 16 + value;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Parses a hex color, falling back to black on malformed input.
    pub fn from_hex(input: &str) -> Self {
        Self::parse_hex(input).unwrap_or_else(|| {
            log::debug!("Malformed color {:?}, using black", input);
            Self::BLACK
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// True when every RGB channel differs by at most `tolerance` (inclusive).
    pub fn matches(&self, other: &Color, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl From<Color> for Color32 {
    fn from(value: Color) -> Self {
        Color32::from_rgb(value.r, value.g, value.b)
    }
}

impl From<Color32> for Color {
    fn from(value: Color32) -> Self {
        Self::rgb(value.r(), value.g(), value.b())
    }
}
