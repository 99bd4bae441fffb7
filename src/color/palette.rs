//! RGBA colors and six-band biome palettes.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlanetError;

/// Number of colors in every biome palette.
pub const PALETTE_SIZE: usize = 6;

/// Linear RGBA color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional). Alpha defaults to 1.
    pub fn from_hex(hex: &str) -> Result<Self, PlanetError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(PlanetError::invalid(format!("malformed hex color '{}'", hex)));
        }
        let channel = |i: usize| -> Result<f32, PlanetError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| PlanetError::invalid(format!("malformed hex color '{}'", hex)))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbb`, or `#rrggbbaa` when alpha is not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Channel-wise `self + (other - self) * t`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Quantizes to 8 bits per channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgba::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Six colors ordered deep water → shallow water → land → highland → peak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomePalette {
    pub name: String,
    pub colors: [Rgba; PALETTE_SIZE],
}

impl BiomePalette {
    /// Builds a palette from hex strings; exactly six are required.
    pub fn from_hex<S: AsRef<str>>(name: impl Into<String>, hex: &[S]) -> Result<Self, PlanetError> {
        let name = name.into();
        if hex.is_empty() {
            return Err(PlanetError::invalid(format!("palette '{}' is empty", name)));
        }
        if hex.len() != PALETTE_SIZE {
            return Err(PlanetError::invalid(format!(
                "palette '{}' has {} colors, expected {}",
                name,
                hex.len(),
                PALETTE_SIZE
            )));
        }
        let mut colors = [Rgba::default(); PALETTE_SIZE];
        for (slot, h) in colors.iter_mut().zip(hex) {
            *slot = Rgba::from_hex(h.as_ref())?;
        }
        Ok(Self { name, colors })
    }

    /// Oceans, green lowlands, brown highlands, snow caps.
    pub fn earth() -> Self {
        Self::builtin("earth", ["#042e5e", "#022041", "#07b800", "#634302", "#634302", "#ffffff"])
    }

    /// Lava seas and scorched rock.
    pub fn volcano() -> Self {
        Self::builtin("volcano", ["#ff1100", "#ffd666", "#422100", "#422100", "#d45800", "#b00017"])
    }

    /// Ice fields with frozen lakes.
    pub fn snowy() -> Self {
        Self::builtin("snowy", ["#ffffff", "#c7c7c7", "#e3e3e3", "#7acaff", "#006887", "#ffffff"])
    }

    /// All built-in palettes.
    pub fn presets() -> Vec<BiomePalette> {
        vec![Self::earth(), Self::volcano(), Self::snowy()]
    }

    /// Looks up a built-in palette by name.
    pub fn preset(name: &str) -> Option<BiomePalette> {
        Self::presets().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn builtin(name: &str, hex: [&str; PALETTE_SIZE]) -> Self {
        let mut colors = [Rgba::default(); PALETTE_SIZE];
        for (slot, h) in colors.iter_mut().zip(hex) {
            // Built-in tables are known-good literals.
            *slot = Rgba::from_hex(h).unwrap_or(Rgba::WHITE);
        }
        Self { name: name.to_string(), colors }
    }
}

#[derive(Deserialize)]
struct RawPalette {
    name: String,
    colors: Vec<String>,
}

impl<'de> Deserialize<'de> for BiomePalette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPalette::deserialize(deserializer)?;
        BiomePalette::from_hex(raw.name, &raw.colors).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for BiomePalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for c in &self.colors {
            write!(f, " {}", c.to_hex())?;
        }
        Ok(())
    }
}
