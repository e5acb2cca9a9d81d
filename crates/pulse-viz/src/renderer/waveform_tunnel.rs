//! Waveform tunnel visualization.
//!
//! Concentric rings trace the waveform around a circle. Deeper rings are
//! smaller, fainter and less displaced, which reads as perspective.

use pulse_viz_api::DrawList;
use rand::RngCore;
use std::f32::consts::TAU;

use super::{polar, Scene, Visualization};
use crate::utils::math::{fraction, map_amp, map_clamped};

/// Number of tunnel rings
const NUM_RINGS: usize = 20;
/// Waveform samples skipped between ring vertices
const SAMPLE_STRIDE: usize = 4;
/// Radial displacement of a full-scale sample on the front ring
const WAVE_SCALE: f32 = 100.0;
/// Radius of the deepest ring
const INNER_RADIUS: f32 = 50.0;
const POINTER_DRIFT: f32 = 0.05;

pub struct WaveformTunnel;

impl Visualization for WaveformTunnel {
    fn draw(&self, scene: &Scene, _rng: &mut dyn RngCore, out: &mut DrawList) {
        let center = scene.drift_center(POINTER_DRIFT);
        let outer_radius = scene.min_dim() * 0.4;
        let waveform = &scene.frame.waveform;
        let rings = NUM_RINGS as f32;

        for ring in 0..NUM_RINGS {
            let r = ring as f32;
            let depth = map_clamped(r, 0.0, rings, 1.0, 0.0);
            let radius = map_clamped(r, 0.0, rings, outer_radius, INNER_RADIUS)
                + map_amp(scene.frame.bass, 0.0, 30.0) * depth;
            let offset = (scene.time * 2.0 + r * 0.2) % TAU;

            let points = waveform
                .iter()
                .enumerate()
                .step_by(SAMPLE_STRIDE)
                .map(|(i, sample)| {
                    let angle = map_clamped(i as f32, 0.0, waveform.len() as f32, 0.0, TAU);
                    let radial = radius + sample.clamp(-1.0, 1.0) * WAVE_SCALE * depth;
                    center + polar(angle + offset) * radial
                })
                .collect();

            let color = scene.color(
                scene.shifted_hue(fraction(ring, NUM_RINGS), r * 10.0),
                80.0,
                90.0,
                map_clamped(r, 0.0, rings, 90.0, 20.0),
            );
            out.polygon(points, map_clamped(r, 0.0, rings, 3.0, 1.0), color);
        }
    }
}
