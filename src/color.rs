//! RGB colors for canvas drawing
//!
//! Balloon shading derives every variant from a single base color, so the
//! lighten/darken helpers clamp instead of wrapping.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// CSS hex string (`#rrggbb`)
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Add `percent`% of full scale to every channel, saturating at 255
    pub fn lighten(self, percent: f32) -> Self {
        self.shift(percent_amount(percent))
    }

    /// Subtract `percent`% of full scale from every channel, saturating at 0
    pub fn darken(self, percent: f32) -> Self {
        self.shift(-percent_amount(percent))
    }

    fn shift(self, amount: i32) -> Self {
        let ch = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    pub const fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

/// Channel offset for a percentage of 255
fn percent_amount(percent: f32) -> i32 {
    (2.55 * percent).round() as i32
}

/// A color with straight alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// CSS string: hex when opaque, `rgba(...)` otherwise
    pub fn to_css(self) -> String {
        if self.alpha >= 1.0 {
            self.rgb.to_css()
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.rgb.r,
                self.rgb.g,
                self.rgb.b,
                self.alpha.clamp(0.0, 1.0)
            )
        }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}
