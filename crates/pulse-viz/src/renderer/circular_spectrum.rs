//! Circular spectrum visualization.
//!
//! A ring of radial bars over the lower half of the spectrum, three wobbling
//! rings driven by bass, mid and treble, and a pulsing disc in the middle.

use pulse_viz_api::{DrawList, EnergyBand};
use rand::RngCore;
use std::f32::consts::TAU;

use super::{polar, Scene, Visualization};
use crate::utils::math::{fraction, map_amp, map_clamped};

/// Number of radial bars
const NUM_BARS: usize = 180;
/// Vertices per inner ring
const RING_POINTS: usize = 60;
/// How far the center drifts toward the pointer
const POINTER_DRIFT: f32 = 0.03;

const RING_BANDS: [EnergyBand; 3] = [EnergyBand::Bass, EnergyBand::Mid, EnergyBand::Treble];

pub struct CircularSpectrum;

impl Visualization for CircularSpectrum {
    fn draw(&self, scene: &Scene, _rng: &mut dyn RngCore, out: &mut DrawList) {
        let center = scene.drift_center(POINTER_DRIFT);
        let radius = scene.min_dim() * 0.2;

        // Outer spectrum bars
        for i in 0..NUM_BARS {
            let angle = map_clamped(i as f32, 0.0, NUM_BARS as f32, 0.0, TAU);
            let amp = scene.amplitude(i, NUM_BARS, 2);
            let length = map_amp(amp, radius, radius + 200.0);

            let color = scene.color(
                scene.hue(fraction(i, NUM_BARS)),
                map_amp(amp, 50.0, 100.0),
                map_amp(amp, 30.0, 100.0),
                80.0,
            );

            let dir = polar(angle);
            out.line(
                center + dir * radius,
                center + dir * length,
                map_amp(amp, 1.0, 4.0),
                color,
            );
        }

        // Inner rotating rings, one per energy band
        for (j, band) in RING_BANDS.iter().enumerate() {
            let energy = scene.frame.energy(*band);
            let ring_radius = map_clamped(j as f32, 0.0, 3.0, radius * 0.3, radius * 0.8)
                + map_amp(energy, 0.0, 30.0);
            let wobble_amp = map_amp(energy, 0.0, 20.0);
            let spin = scene.time * (j + 1) as f32 * 0.5;

            let points = (0..RING_POINTS)
                .map(|i| {
                    let angle = map_clamped(i as f32, 0.0, RING_POINTS as f32, 0.0, TAU) + spin;
                    let wobble = (angle * 6.0 + scene.time * 3.0).sin() * wobble_amp;
                    center + polar(angle) * (ring_radius + wobble)
                })
                .collect();

            let color = scene.color(scene.hue(fraction(j, RING_BANDS.len())), 80.0, 90.0, 60.0);
            out.polygon(points, 2.0, color);
        }

        // Center pulse
        let pulse = map_amp(scene.frame.bass, 30.0, 120.0);
        out.disc(center, pulse, scene.color(scene.hue(0.5), 70.0, 95.0, 50.0));
    }
}
