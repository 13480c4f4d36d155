//! RGBA colour used by rectangle objects and the canvas.
//!
//! Channels are stored as `f32` in sRGB space (0.0 – 1.0), the same space
//! the resource files are written in. The renderer converts to linear light
//! when it uploads instances.
//!
//! Resource files may spell a colour three ways:
//! ```json
//! "color": [255, 0, 0]
//! "color": [255, 0, 0, 128]
//! "color": "#ff0000"
//! "color": "red"
//! ```

use serde::{Deserialize, Serialize};

/// sRGB RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "ColorValue")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque colour from red, green, blue components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour from all four components.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from 8-bit components including alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Quantize to 8-bit components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex_str(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Look up one of the built-in colour names (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "white" => [255, 255, 255],
            "black" => [0, 0, 0],
            "red" => [255, 0, 0],
            "green" => [0, 255, 0],
            "blue" => [0, 0, 255],
            "yellow" => [255, 255, 0],
            "cyan" => [0, 255, 255],
            "magenta" => [255, 0, 255],
            "gray" | "grey" => [190, 190, 190],
            "orange" => [255, 165, 0],
            "purple" => [160, 32, 240],
            _ => return None,
        };
        Some(Self::from_rgba8(rgb[0], rgb[1], rgb[2], 255))
    }

    /// Convert to linear light for an sRGB render target.
    pub fn to_linear(self) -> [f32; 4] {
        let lin = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        [lin(self.r), lin(self.g), lin(self.b), self.a]
    }
}

/// Wire form of a colour in resource files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Channels(Vec<u8>),
    Text(String),
}

impl TryFrom<ColorValue> for Color {
    type Error = String;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Channels(c) => match c.as_slice() {
                &[r, g, b] => Ok(Self::from_rgba8(r, g, b, 255)),
                &[r, g, b, a] => Ok(Self::from_rgba8(r, g, b, a)),
                _ => Err(format!("expected 3 or 4 colour channels, found {}", c.len())),
            },
            ColorValue::Text(s) => Self::from_hex_str(&s)
                .or_else(|| Self::from_name(&s))
                .ok_or_else(|| format!("unknown colour `{s}`")),
        }
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        ColorValue::Channels(color.to_rgba8().to_vec())
    }
}
