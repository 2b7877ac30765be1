use serde::{Deserialize, Serialize};

use crate::model::Base;

/// Color palette for the helix scene, linear RGB.
///
/// Defaults reproduce the lab look: green/red/blue/yellow bases on a light
/// gray backbone with white translucent bonds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Adenine base color.
    pub base_a: [f32; 3],
    /// Thymine base color.
    pub base_t: [f32; 3],
    /// Cytosine base color.
    pub base_c: [f32; 3],
    /// Guanine base color.
    pub base_g: [f32; 3],
    /// Sugar-phosphate backbone node color.
    pub backbone: [f32; 3],
    /// Hydrogen bond color.
    pub bond: [f32; 3],
    /// Hydrogen bond opacity.
    pub bond_alpha: f32,
    /// Mutation flash highlight color.
    pub highlight: [f32; 3],
    /// Scene clear color.
    pub background: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            base_a: srgb8(0x4a, 0xde, 0x80),
            base_t: srgb8(0xf8, 0x71, 0x71),
            base_c: srgb8(0x60, 0xa5, 0xfa),
            base_g: srgb8(0xfa, 0xcc, 0x15),
            backbone: srgb8(0xe5, 0xe7, 0xeb),
            bond: [1.0, 1.0, 1.0],
            bond_alpha: 0.4,
            highlight: [1.0, 1.0, 1.0],
            background: srgb8(0x1e, 0x1e, 0x24),
        }
    }
}

impl ColorOptions {
    /// Palette entry for a base symbol.
    #[must_use]
    pub fn base_color(&self, base: Base) -> [f32; 3] {
        match base {
            Base::A => self.base_a,
            Base::T => self.base_t,
            Base::C => self.base_c,
            Base::G => self.base_g,
        }
    }
}

/// Convert an 8-bit sRGB triple to linear RGB, the space every shader and
/// clear color works in.
#[must_use]
pub fn srgb8(r: u8, g: u8, b: u8) -> [f32; 3] {
    [srgb_channel(r), srgb_channel(g), srgb_channel(b)]
}

fn srgb_channel(c: u8) -> f32 {
    let c = f32::from(c) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_color_lookup_matches_palette_fields() {
        let colors = ColorOptions::default();
        assert_eq!(colors.base_color(Base::A), colors.base_a);
        assert_eq!(colors.base_color(Base::T), colors.base_t);
        assert_eq!(colors.base_color(Base::C), colors.base_c);
        assert_eq!(colors.base_color(Base::G), colors.base_g);
    }

    #[test]
    fn srgb_conversion_endpoints() {
        assert_eq!(srgb8(0, 0, 0), [0.0; 3]);
        assert_eq!(srgb8(255, 255, 255), [1.0; 3]);
        // Mid grays land strictly below their sRGB encoding.
        let [g, _, _] = srgb8(128, 128, 128);
        assert!(g > 0.2 && g < 0.25);
    }
}
