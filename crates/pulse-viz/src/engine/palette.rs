//! Color schemes and hue blending.
//!
//! A scheme is a short list of hue anchors. `hue_at` turns it into a
//! continuous, periodic hue function over `t` by interpolating between
//! neighbouring anchors and wrapping from the last anchor back to the first.

use crate::utils::math::lerp;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScheme {
    pub name: &'static str,
    /// Hue anchors (0-360), at least one
    pub anchors: &'static [f32],
    /// Multiplier applied to every saturation drawn with this scheme
    pub saturation: f32,
}

/// Built-in schemes, cycled in this order
pub const SCHEMES: [ColorScheme; 5] = [
    ColorScheme::new("Neon", &[320.0, 180.0, 60.0, 280.0]),
    ColorScheme::new("Fire", &[0.0, 30.0, 45.0, 15.0]),
    ColorScheme::new("Ocean", &[180.0, 200.0, 220.0, 240.0]),
    ColorScheme::new("Vapor", &[300.0, 180.0, 330.0, 200.0]),
    ColorScheme::monochrome("Mono"),
];

impl ColorScheme {
    pub const fn new(name: &'static str, anchors: &'static [f32]) -> Self {
        Self {
            name,
            anchors,
            saturation: 1.0,
        }
    }

    /// Grayscale scheme; saturation is forced to zero
    pub const fn monochrome(name: &'static str) -> Self {
        Self {
            name,
            anchors: &[0.0, 0.0, 0.0, 0.0],
            saturation: 0.0,
        }
    }

    /// Scheme at `index`, wrapping around the registry
    pub fn by_index(index: usize) -> &'static ColorScheme {
        &SCHEMES[index % SCHEMES.len()]
    }

    pub fn count() -> usize {
        SCHEMES.len()
    }

    /// Blended hue at position `t`; periodic with period 1
    pub fn hue_at(&self, t: f32) -> f32 {
        let len = self.anchors.len();
        if len == 0 {
            return 0.0;
        }

        let f = t.rem_euclid(1.0) * len as f32;
        let base = f.floor();
        let i0 = (base as usize) % len;
        let i1 = (i0 + 1) % len;
        let blend = f - base;

        lerp(self.anchors[i0], self.anchors[i1], blend).rem_euclid(360.0)
    }

    /// Scale a saturation value by this scheme's multiplier
    pub fn saturate(&self, saturation: f32) -> f32 {
        saturation * self.saturation
    }
}
