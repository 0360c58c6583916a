use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An RGB color with components in `[0, 1]`. Serialized as a hex string.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{0}' is neither a hex color nor an (r, g, b) triple with components in [0, 1]")]
pub struct ParseColorError(String);

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok().map(|v| v as f32 / 255.0);
        match hex.len() {
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #rgb is shorthand for #rrggbb
            3 => Some(Self::rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            _ => None,
        }
    }

    fn from_triple(triple: &str) -> Option<Self> {
        let inner = triple.strip_prefix('(')?.strip_suffix(')')?;

        let mut components = [0.0f32; 3];
        let mut parts = inner.split(',');
        for component in &mut components {
            let value = parts.next()?.trim().parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&value) {
                return None;
            }
            *component = value;
        }
        if parts.next().is_some() {
            return None;
        }

        let [r, g, b] = components;
        Some(Self::rgb(r, g, b))
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let color = match s.strip_prefix('#') {
            Some(hex) => Self::from_hex(hex),
            None => Self::from_triple(s).or_else(|| Self::from_hex(s)),
        };

        color.ok_or_else(|| ParseColorError(s.to_owned()))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
