//! Draw primitives emitted by the engine and consumed by a rasterizer.
//!
//! Coordinates use the nannou convention: origin at the canvas center, +y up.

use nannou::geom::Vec2;

/// Color in HSB space with the ranges hue 0-360, saturation/brightness/alpha 0-100
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsba {
    /// Builds a color, wrapping the hue into [0, 360) and clamping the other channels
    pub fn new(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            saturation: saturation.clamp(0.0, 100.0),
            brightness: brightness.clamp(0.0, 100.0),
            alpha: alpha.clamp(0.0, 100.0),
        }
    }

    pub const fn gray(brightness: f32, alpha: f32) -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            brightness,
            alpha,
        }
    }

    pub const WHITE: Hsba = Hsba::gray(100.0, 100.0);
    pub const BLACK: Hsba = Hsba::gray(0.0, 100.0);
}

/// Wraps any hue into [0, 360)
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A single drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Stroked line segment
    Line {
        start: Vec2,
        end: Vec2,
        weight: f32,
        color: Hsba,
    },
    /// Stroked closed polyline
    Polygon {
        points: Vec<Vec2>,
        weight: f32,
        color: Hsba,
    },
    /// Filled circle
    Disc {
        center: Vec2,
        diameter: f32,
        color: Hsba,
    },
    /// Filled axis-aligned ellipse
    Ellipse {
        center: Vec2,
        size: Vec2,
        color: Hsba,
    },
    /// Filled axis-aligned rectangle
    Rect {
        center: Vec2,
        size: Vec2,
        color: Hsba,
    },
}

/// Ordered list of primitives for one render pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, start: Vec2, end: Vec2, weight: f32, color: Hsba) {
        self.primitives.push(Primitive::Line {
            start,
            end,
            weight,
            color,
        });
    }

    /// Closed outline; lists with fewer than two points are dropped
    pub fn polygon(&mut self, points: Vec<Vec2>, weight: f32, color: Hsba) {
        if points.len() < 2 {
            return;
        }
        self.primitives.push(Primitive::Polygon {
            points,
            weight,
            color,
        });
    }

    pub fn disc(&mut self, center: Vec2, diameter: f32, color: Hsba) {
        self.primitives.push(Primitive::Disc {
            center,
            diameter: diameter.max(0.0),
            color,
        });
    }

    pub fn ellipse(&mut self, center: Vec2, size: Vec2, color: Hsba) {
        self.primitives.push(Primitive::Ellipse {
            center,
            size: size.max(Vec2::ZERO),
            color,
        });
    }

    pub fn rect(&mut self, center: Vec2, size: Vec2, color: Hsba) {
        self.primitives.push(Primitive::Rect {
            center,
            size: size.max(Vec2::ZERO),
            color,
        });
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hue_range() {
        assert_eq!(wrap_hue(370.0), 10.0);
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert!(wrap_hue(-1e-9) < 360.0);
    }

    #[test]
    fn test_degenerate_polygon_dropped() {
        let mut list = DrawList::new();
        list.polygon(vec![Vec2::ZERO], 1.0, Hsba::WHITE);
        assert!(list.is_empty());
    }

    #[test]
    fn test_iter_walks_both_ends() {
        let mut list = DrawList::new();
        for d in [1.0, 2.0, 3.0] {
            list.disc(Vec2::ZERO, d, Hsba::WHITE);
        }
        let backwards: Vec<f32> = list
            .iter()
            .rev()
            .map(|p| match *p {
                Primitive::Disc { diameter, .. } => diameter,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(backwards, vec![3.0, 2.0, 1.0]);
        assert_eq!(list.iter().len(), 3);
    }
}
