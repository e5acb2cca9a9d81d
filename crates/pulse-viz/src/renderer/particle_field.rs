//! Noise-displaced dot grid.
//!
//! A fixed grid of dots, each pushed around by a 3D noise field (grid
//! position + time) scaled by the spectrum amplitude of its column, and
//! pulled gently toward the pointer.

use nannou::geom::Vec2;
use noise::{NoiseFn, Perlin};
use pulse_viz_api::DrawList;
use rand::RngCore;
use std::f32::consts::TAU;

use super::{polar, Scene, Visualization};
use crate::utils::math::{fraction, map_amp, map_clamped};

const COLS: usize = 40;
const ROWS: usize = 25;
/// Grid-to-noise coordinate scale
const NOISE_SCALE: f64 = 0.1;
/// Pointer attraction reaches this far
const ATTRACTION_RADIUS: f32 = 300.0;
/// Attraction offset right next to the pointer
const ATTRACTION_STRENGTH: f32 = 2.0;

pub struct ParticleField {
    noise: Perlin,
}

impl ParticleField {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }

    /// Noise sample in [0, 1]
    fn noise01(&self, x: f64, y: f64, t: f64) -> f32 {
        let value = self.noise.get([x, y, t]) as f32;
        ((value + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Offset pulling `from` toward `pointer`, fading linearly to zero at
/// [`ATTRACTION_RADIUS`]. Zero at and beyond the radius and when the two
/// points coincide.
pub fn attraction(from: Vec2, pointer: Vec2) -> Vec2 {
    let delta = pointer - from;
    let distance = delta.length();
    if !(distance > f32::EPSILON && distance < ATTRACTION_RADIUS) {
        return Vec2::ZERO;
    }
    let strength = map_clamped(distance, 0.0, ATTRACTION_RADIUS, ATTRACTION_STRENGTH, 0.0);
    delta / distance * strength
}

impl Visualization for ParticleField {
    fn draw(&self, scene: &Scene, _rng: &mut dyn RngCore, out: &mut DrawList) {
        let bounds = scene.bounds;
        let cell_w = bounds.w() / COLS as f32;
        let cell_h = bounds.h() / ROWS as f32;
        let time = scene.time as f64;

        for y in 0..ROWS {
            for x in 0..COLS {
                let amp = scene.amplitude(x, COLS, 4);

                let mut pos = Vec2::new(
                    bounds.left() + x as f32 * cell_w + cell_w / 2.0,
                    bounds.bottom() + y as f32 * cell_h + cell_h / 2.0,
                );

                // Audio-scaled noise displacement
                let n = self.noise01(x as f64 * NOISE_SCALE, y as f64 * NOISE_SCALE, time);
                let angle = n * TAU * 2.0 + scene.time;
                pos += polar(angle) * map_amp(amp, 0.0, 30.0);

                pos += attraction(pos, scene.pointer);

                let color = scene.color(
                    scene.hue(fraction(x + y, COLS + ROWS)),
                    80.0,
                    map_amp(amp, 20.0, 100.0),
                    70.0,
                );
                out.disc(pos, map_amp(amp, 2.0, 15.0), color);
            }
        }
    }
}
