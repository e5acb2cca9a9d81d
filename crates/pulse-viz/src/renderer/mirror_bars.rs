//! Mirrored spectrum bars around a horizontal centerline.

use nannou::geom::Vec2;
use pulse_viz_api::{DrawList, Hsba};
use rand::RngCore;

use super::{Scene, Visualization};
use crate::utils::math::{fraction, lerp, map_amp};

const NUM_BARS: usize = 64;
/// Amplitude above which a bar gets a glow at the centerline
const GLOW_THRESHOLD: f32 = 200.0;
/// Gap between neighbouring bars
const BAR_GAP: f32 = 2.0;
const POINTER_DRIFT: f32 = 0.05;

pub struct MirrorBars;

impl Visualization for MirrorBars {
    fn draw(&self, scene: &Scene, _rng: &mut dyn RngCore, out: &mut DrawList) {
        let bounds = scene.bounds;
        let bar_width = bounds.w() / NUM_BARS as f32;
        let center_y = lerp(bounds.y(), scene.pointer.y, POINTER_DRIFT);

        for i in 0..NUM_BARS {
            let amp = scene.amplitude(i, NUM_BARS, 2);
            let bar_height = map_amp(amp, 5.0, bounds.h() * 0.45);
            let hue = scene.hue(fraction(i, NUM_BARS));
            let x = bounds.left() + i as f32 * bar_width + bar_width / 2.0;
            let size = Vec2::new((bar_width - BAR_GAP).max(0.0), bar_height);

            // Upper bar, then its dimmer reflection
            out.rect(
                Vec2::new(x, center_y + bar_height / 2.0),
                size,
                scene.color(hue, 85.0, 90.0, 80.0),
            );
            out.rect(
                Vec2::new(x, center_y - bar_height / 2.0),
                size,
                scene.color(hue, 85.0, 70.0, 60.0),
            );

            if amp > GLOW_THRESHOLD {
                out.ellipse(
                    Vec2::new(x, center_y),
                    Vec2::new(bar_width * 2.0, bar_height * 0.3),
                    scene.color(hue, 60.0, 100.0, 30.0),
                );
            }
        }

        out.line(
            Vec2::new(bounds.left(), center_y),
            Vec2::new(bounds.right(), center_y),
            2.0,
            Hsba::gray(100.0, map_amp(scene.frame.bass, 20.0, 80.0)),
        );
    }
}
