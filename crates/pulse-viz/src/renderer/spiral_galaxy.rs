//! Spiral galaxy visualization.
//!
//! Five arms of dots sweep outward over several turns, their radius nudged
//! by spectrum amplitude and a bass-driven wobble. The whole galaxy turns
//! with time and leans toward the pointer. Loud dots occasionally twinkle.

use pulse_viz_api::{DrawList, Hsba};
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

use super::{polar, Scene, Visualization};
use crate::utils::math::{fraction, map_amp, map_clamped};

const ARMS: usize = 5;
const POINTS_PER_ARM: usize = 80;
/// Full turns swept by each arm
const TURNS: f32 = 2.5;
/// Chance per loud dot to twinkle this frame
const TWINKLE_CHANCE: f32 = 0.03;
const TWINKLE_MIN_AMP: f32 = 100.0;
/// Layers of the center glow
const GLOW_LAYERS: usize = 3;
const POINTER_DRIFT: f32 = 0.05;

pub struct SpiralGalaxy;

impl Visualization for SpiralGalaxy {
    fn draw(&self, scene: &Scene, rng: &mut dyn RngCore, out: &mut DrawList) {
        let center = scene.drift_center(POINTER_DRIFT);
        let to_pointer = scene.pointer - scene.center();
        let rotation = scene.time * 0.2 + to_pointer.y.atan2(to_pointer.x) * 0.1;
        let outer_radius = scene.min_dim() * 0.45;
        let wobble_amp = map_amp(scene.frame.bass, 5.0, 25.0);
        let points = POINTS_PER_ARM as f32;

        for arm in 0..ARMS {
            let arm_offset = TAU / ARMS as f32 * arm as f32;

            for i in 0..POINTS_PER_ARM {
                let amp = scene.amplitude(i, POINTS_PER_ARM, 3);
                let angle = map_clamped(i as f32, 0.0, points, 0.0, TAU * TURNS) + arm_offset;
                let wobble = (angle * 3.0 + scene.time * 2.0).sin() * wobble_amp;
                let radius = map_clamped(i as f32, 0.0, points, 20.0, outer_radius)
                    + map_amp(amp, 0.0, 40.0)
                    + wobble;

                let pos = center + polar(angle + rotation) * radius;
                let size = map_amp(amp, 3.0, 15.0);
                let color = scene.color(
                    scene.shifted_hue(fraction(i, POINTS_PER_ARM), arm as f32 * 30.0),
                    80.0,
                    90.0,
                    map_clamped(i as f32, 0.0, points, 90.0, 40.0),
                );
                out.disc(pos, size, color);

                if amp > TWINKLE_MIN_AMP && rng.random::<f32>() < TWINKLE_CHANCE {
                    out.disc(pos, size * 2.0, Hsba::gray(100.0, 80.0));
                }
            }
        }

        // Center glow, largest layer first
        let glow_size = map_amp(scene.frame.bass, 40.0, 100.0);
        let glow = scene.color(scene.hue(0.5), 60.0, 100.0, 20.0);
        for layer in (1..=GLOW_LAYERS).rev() {
            out.disc(center, glow_size * layer as f32, glow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use nannou::geom::Vec2;
    use pulse_viz_api::Primitive;
    use rand::rngs::StdRng;
    use std::f32::consts::FRAC_PI_2;
    use rand::SeedableRng;

    const BASE_PRIMITIVES: usize = ARMS * POINTS_PER_ARM + GLOW_LAYERS;

    fn render(amp: u8, seed: u64) -> DrawList {
        let frame = flat_frame(amp);
        let mut out = DrawList::new();
        SpiralGalaxy.draw(&scene(&frame), &mut StdRng::seed_from_u64(seed), &mut out);
        out
    }

    #[test]
    fn test_quiet_galaxy_never_twinkles() {
        for seed in 0..20 {
            assert_eq!(render(100, seed).len(), BASE_PRIMITIVES);
        }
    }

    #[test]
    fn test_loud_galaxy_twinkles_sometimes() {
        // 400 candidates at 3% each: no twinkle at all over 20 frames is practically impossible
        let extra: usize = (0..20).map(|seed| render(255, seed).len() - BASE_PRIMITIVES).sum();
        assert!(extra > 0);
        assert!(extra < 20 * ARMS * POINTS_PER_ARM / 4);
    }

    #[test]
    fn test_same_seed_same_frame() {
        assert_eq!(render(255, 5), render(255, 5));
    }

    #[test]
    fn test_glow_layers_follow_bass() {
        let out = render(255, 0);
        let diameters: Vec<f32> = out
            .iter()
            .rev()
            .take(GLOW_LAYERS)
            .map(|p| match *p {
                Primitive::Disc { diameter, .. } => diameter,
                _ => panic!("glow is made of discs"),
            })
            .collect();
        assert_eq!(diameters, vec![100.0, 200.0, 300.0]);
    }

    /// Angle of the innermost dot of the first arm, silent input
    fn first_dot_angle(time: f32, pointer: Vec2) -> f32 {
        let frame = flat_frame(0);
        let scene = scene_at(&frame, time, pointer);
        let center = scene.drift_center(POINTER_DRIFT);
        let mut out = DrawList::new();
        SpiralGalaxy.draw(&scene, &mut StdRng::seed_from_u64(0), &mut out);
        let Some(Primitive::Disc { center: dot, .. }) = out.iter().next() else {
            panic!("expected a dot first");
        };
        angle_about(center, *dot)
    }

    #[test]
    fn test_galaxy_turns_with_time() {
        let dt = 0.4;
        let turned = angle_delta(
            first_dot_angle(TIME + dt, pointer()),
            first_dot_angle(TIME, pointer()),
        );
        assert!((turned - 0.2 * dt).abs() < 1e-3, "turned {}", turned);
    }

    #[test]
    fn test_galaxy_leans_toward_pointer() {
        let right = first_dot_angle(TIME, Vec2::new(200.0, 0.0));
        let above = first_dot_angle(TIME, Vec2::new(0.0, 200.0));
        // Pointer straight right adds nothing
        assert!((angle_delta(right, 0.2 * TIME)).abs() < 1e-3);
        // A quarter turn of the pointer leans the galaxy a tenth of that
        assert!((angle_delta(above, right) - 0.1 * FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_arm_alpha_fades_outward() {
        let out = render(50, 0);
        let Some(Primitive::Disc { color, .. }) = out.iter().next() else {
            panic!("expected a dot");
        };
        assert_eq!(color.alpha, 90.0);
    }
}
