use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Stroke thickness assigned when the caller does not choose one.
pub const DEFAULT_STROKE_THICKNESS: f64 = 2.0;

/// Stroke parameters of a figure outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    thickness: f64,
}

impl Stroke {
    /// Creates a new stroke.
    ///
    /// # Errors
    ///
    /// Returns an error if `thickness` is not a positive finite number.
    pub fn new(figure: &'static str, thickness: f64) -> Result<Self, RegistryError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(RegistryError::InvalidParameter {
                figure,
                parameter: super::STROKE_THICKNESS.to_owned(),
                reason: format!("stroke thickness must be positive, got {thickness}"),
            });
        }
        Ok(Self { thickness })
    }

    /// Returns the stroke thickness.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Returns half the stroke thickness.
    #[must_use]
    pub fn half_thickness(&self) -> f64 {
        self.thickness * 0.5
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_STROKE_THICKNESS,
        }
    }
}

/// A 32-bit packed ARGB color (`0xAARRGGBB`).
///
/// Every figure variant defaults to opaque black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const TRANSPARENT: Color = Color(0);

    /// Packs the four channels into a color.
    #[must_use]
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b))
    }

    #[must_use]
    pub fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    #[must_use]
    pub fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    #[must_use]
    pub fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    #[must_use]
    pub fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub fn with_alpha(self, a: u8) -> Self {
        Self::from_argb(a, self.red(), self.green(), self.blue())
    }

    /// Returns the channels in `[r, g, b, a]` order.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    /// Formats the RGB channels as `#rrggbb`.
    #[must_use]
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// Returns the alpha channel as an opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(self) -> f64 {
        f64::from(self.alpha()) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}
