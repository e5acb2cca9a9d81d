//! Nested rotating polygons with a pulsing eye in the middle.

use pulse_viz_api::{DrawList, EnergyBand, Hsba};
use rand::RngCore;
use std::f32::consts::TAU;

use super::{polar, Scene, Visualization};
use crate::utils::math::{fraction, map_amp, map_clamped};

/// Polygons drawn, starting from a triangle
const SHAPES: usize = 6;
const MIN_SIDES: usize = 3;
const POINTER_DRIFT: f32 = 0.03;

/// Band driving the polygon at `shape`: two each for bass, mid, treble
fn shape_band(shape: usize) -> EnergyBand {
    match shape {
        0 | 1 => EnergyBand::Bass,
        2 | 3 => EnergyBand::Mid,
        _ => EnergyBand::Treble,
    }
}

pub struct GeometricPulse;

impl Visualization for GeometricPulse {
    fn draw(&self, scene: &Scene, _rng: &mut dyn RngCore, out: &mut DrawList) {
        let center = scene.drift_center(POINTER_DRIFT);
        let max_radius = scene.min_dim() * 0.4;
        let shapes = SHAPES as f32;

        for s in 0..SHAPES {
            let sides = s + MIN_SIDES;
            let energy = scene.frame.energy(shape_band(s));
            let radius = map_clamped(s as f32, 0.0, shapes, max_radius * 0.2, max_radius)
                + map_amp(energy, 0.0, 50.0);

            // Even shapes turn one way, odd the other, outer ones faster
            let direction = if s % 2 == 0 { 1.0 } else { -1.0 };
            let rotation = scene.time * direction * (0.5 + s as f32 * 0.1);
            let ripple = map_amp(energy, 0.0, 30.0);

            let points = (0..sides)
                .map(|i| {
                    let angle = map_clamped(i as f32, 0.0, sides as f32, 0.0, TAU) + rotation;
                    let r = radius + (angle * sides as f32 + scene.time * 3.0).sin() * ripple;
                    center + polar(angle) * r
                })
                .collect();

            let color = scene.color(
                scene.hue(fraction(s, SHAPES)),
                80.0,
                90.0,
                map_clamped(s as f32, 0.0, shapes, 80.0, 40.0),
            );
            out.polygon(points, map_amp(energy, 1.0, 4.0), color);
        }

        // Center eye
        let eye = map_amp(scene.frame.bass, 20.0, 60.0);
        out.disc(center, eye, Hsba::gray(100.0, 90.0));
        out.disc(center, eye * 0.5, Hsba::BLACK);
    }
}
