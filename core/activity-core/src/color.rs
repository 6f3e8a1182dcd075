//! Packed ARGB colors as written by the companion app.
//!
//! Layout is fixed: bits `[31:24]` alpha, `[23:16]` red, `[15:8]` green,
//! `[7:0]` blue.

use print_activity_protocol::keys;
use serde::{Deserialize, Serialize};

/// Packs four byte channels into one ARGB word.
pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Splits an ARGB word into `(r, g, b, a)`.
pub fn unpack(argb: u32) -> (u8, u8, u8, u8) {
    (
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
        ((argb >> 24) & 0xFF) as u8,
    )
}

/// A packed ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

/// Channels normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Argb {
    pub const fn new(argb: u32) -> Self {
        Argb(argb)
    }

    pub fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Argb(pack(r, g, b, a))
    }

    /// Reads a color from the store's signed integer representation.
    ///
    /// Writers on some platforms persist the color as a sign-extended 32-bit
    /// value, so only the low 32 bits carry meaning.
    pub fn from_stored(value: i64) -> Self {
        Argb(value as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn channels(self) -> (u8, u8, u8, u8) {
        unpack(self.0)
    }

    pub fn normalized(self) -> Rgba {
        let (r, g, b, a) = self.channels();
        Rgba {
            red: f64::from(r) / 255.0,
            green: f64::from(g) / 255.0,
            blue: f64::from(b) / 255.0,
            alpha: f64::from(a) / 255.0,
        }
    }

    /// `#AARRGGBB`, handy for logs and the CLI.
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Argb(value)
    }
}

/// Which appearance variant of the machine color a surface wants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, uniffi::Enum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    /// Store key holding the machine color for this variant.
    pub fn color_key(self) -> &'static str {
        match self {
            ThemeVariant::Light => keys::PRIMARY_COLOR,
            ThemeVariant::Dark => keys::PRIMARY_COLOR_DARK,
        }
    }
}
