//! Color type used by overlays.
//!
//! Clip properties carry colors as CSS hex strings (`#fff`, `#ffffff`,
//! `#ffffffcc`). They are parsed here once so renderers get plain floats.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GemCutError;

/// RGBA color with 32-bit float components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to 8-bit RGBA.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Parse a CSS hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> crate::Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || GemCutError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = nibble * 17;
                }
                Ok(Self::from_rgba8(channels[0], channels[1], channels[2], 255))
            }
            6 => Ok(Self::from_rgba8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                255,
            )),
            8 => Ok(Self::from_rgba8(
                byte(&digits[0..2])?,
                byte(&digits[2..4])?,
                byte(&digits[4..6])?,
                byte(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Parse a hex color, falling back to `default` on malformed input.
    pub fn from_hex_or(hex: Option<&str>, default: Self) -> Self {
        hex.and_then(|h| Self::from_hex(h).ok()).unwrap_or(default)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Return this color with its alpha multiplied by `opacity`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl FromStr for Color {
    type Err = GemCutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
