pub mod circular_spectrum;
pub mod geometric_pulse;
pub mod mirror_bars;
pub mod particle_field;
pub mod spiral_galaxy;
pub mod waveform_tunnel;

use nannou::geom::{Rect, Vec2};
use pulse_viz_api::{AudioFrame, DrawList, Hsba};
use rand::RngCore;

use crate::engine::ColorScheme;

pub use circular_spectrum::CircularSpectrum;
pub use geometric_pulse::GeometricPulse;
pub use mirror_bars::MirrorBars;
pub use particle_field::ParticleField;
pub use spiral_galaxy::SpiralGalaxy;
pub use waveform_tunnel::WaveformTunnel;

/// The selectable visual modes, in cycling order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Circular,
    Tunnel,
    Field,
    Bars,
    Galaxy,
    Geometry,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Circular,
        Mode::Tunnel,
        Mode::Field,
        Mode::Bars,
        Mode::Galaxy,
        Mode::Geometry,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Mode> {
        Self::ALL.get(index).copied()
    }

    /// Mode for a 1-based number key (1-6)
    pub fn from_number(number: usize) -> Option<Mode> {
        number.checked_sub(1).and_then(Self::from_index)
    }

    pub fn next(self) -> Mode {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Circular => "Circular",
            Mode::Tunnel => "Tunnel",
            Mode::Field => "Field",
            Mode::Bars => "Bars",
            Mode::Galaxy => "Galaxy",
            Mode::Geometry => "Geometry",
        }
    }
}

/// Everything a visual mode reads for one frame
pub struct Scene<'a> {
    pub frame: &'a AudioFrame,
    pub scheme: &'a ColorScheme,
    /// Animation clock
    pub time: f32,
    /// Global hue rotation in degrees
    pub hue_offset: f32,
    pub pointer: Vec2,
    pub bounds: Rect,
}

impl Scene<'_> {
    /// Scheme hue at `t`, rotated by the global hue offset
    pub fn hue(&self, t: f32) -> f32 {
        self.shifted_hue(t, 0.0)
    }

    /// Scheme hue at `t` with an extra rotation
    pub fn shifted_hue(&self, t: f32, shift: f32) -> f32 {
        pulse_viz_api::wrap_hue(self.scheme.hue_at(t) + self.hue_offset + shift)
    }

    /// Scheme-derived color; saturation goes through the scheme multiplier
    pub fn color(&self, hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Hsba {
        Hsba::new(hue, self.scheme.saturate(saturation), brightness, alpha)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.xy()
    }

    pub fn min_dim(&self) -> f32 {
        self.bounds.w().min(self.bounds.h())
    }

    /// Canvas center pulled toward the pointer by `factor`
    pub fn drift_center(&self, factor: f32) -> Vec2 {
        self.center().lerp(self.pointer, factor)
    }

    /// Amplitude sampled for position `i` of `n`, using the first `1/fraction` of the spectrum
    pub fn amplitude(&self, i: usize, n: usize, fraction: usize) -> f32 {
        sample_spectrum(&self.frame.spectrum, i, n, fraction)
    }
}

/// Trait that all visual modes implement
///
/// Modes hold no per-frame state: output depends only on the scene, except
/// where a mode draws from `rng` on purpose.
pub trait Visualization {
    fn draw(&self, scene: &Scene, rng: &mut dyn RngCore, out: &mut DrawList);
}

/// Spectrum index for position `i` of `n` when only the first `len / fraction`
/// bins are used. Always a valid index for a non-empty spectrum.
pub fn spectrum_index(i: usize, n: usize, len: usize, fraction: usize) -> usize {
    if len == 0 || n == 0 {
        return 0;
    }
    let fraction = fraction.max(1);
    let i = i.min(n - 1);
    let index = ((i as f64 / n as f64) * (len as f64 / fraction as f64)).floor() as usize;
    index.min(len - 1)
}

/// Amplitude at [`spectrum_index`]; silent for an empty spectrum
pub fn sample_spectrum(spectrum: &[u8], i: usize, n: usize, fraction: usize) -> f32 {
    spectrum
        .get(spectrum_index(i, n, spectrum.len(), fraction))
        .map_or(0.0, |&amp| amp as f32)
}

/// Unit vector at `angle` radians
pub fn polar(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Owns one implementation per [`Mode`] and dispatches to the active one
pub struct Renderer {
    visualizations: Vec<Box<dyn Visualization>>,
}

impl Renderer {
    /// `noise_seed` seeds the field mode's noise so it is reproducible
    pub fn new(noise_seed: u32) -> Self {
        let visualizations: Vec<Box<dyn Visualization>> = Mode::ALL
            .iter()
            .map(|mode| -> Box<dyn Visualization> {
                match mode {
                    Mode::Circular => Box::new(CircularSpectrum),
                    Mode::Tunnel => Box::new(WaveformTunnel),
                    Mode::Field => Box::new(ParticleField::new(noise_seed)),
                    Mode::Bars => Box::new(MirrorBars),
                    Mode::Galaxy => Box::new(SpiralGalaxy),
                    Mode::Geometry => Box::new(GeometricPulse),
                }
            })
            .collect();

        Self { visualizations }
    }

    pub fn draw(&self, mode: Mode, scene: &Scene, rng: &mut dyn RngCore, out: &mut DrawList) {
        self.visualizations[mode.index()].draw(scene, rng, out);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::engine::palette::SCHEMES;

    pub fn bounds() -> Rect {
        Rect::from_w_h(800.0, 600.0)
    }

    /// A frame with every bin and band at `amp`
    pub fn flat_frame(amp: u8) -> AudioFrame {
        let mut frame = AudioFrame::silent();
        frame.spectrum.iter_mut().for_each(|s| *s = amp);
        frame.waveform = (0..512).map(|i| (i as f32 * 0.1).sin()).collect();
        frame.bass = amp as f32;
        frame.mid = amp as f32;
        frame.treble = amp as f32;
        frame
    }

    pub const TIME: f32 = 1.5;

    pub fn pointer() -> Vec2 {
        Vec2::new(120.0, -80.0)
    }

    pub fn scene(frame: &AudioFrame) -> Scene<'_> {
        scene_at(frame, TIME, pointer())
    }

    pub fn scene_at(frame: &AudioFrame, time: f32, pointer: Vec2) -> Scene<'_> {
        Scene {
            frame,
            scheme: &SCHEMES[0],
            time,
            hue_offset: 40.0,
            pointer,
            bounds: bounds(),
        }
    }

    /// Direction of `point` seen from `center`, radians
    pub fn angle_about(center: Vec2, point: Vec2) -> f32 {
        let d = point - center;
        d.y.atan2(d.x)
    }

    /// `to - from` wrapped into (-PI, PI]
    pub fn angle_delta(to: f32, from: f32) -> f32 {
        use std::f32::consts::{PI, TAU};
        let d = (to - from).rem_euclid(TAU);
        if d > PI {
            d - TAU
        } else {
            d
        }
    }

    /// Every hue, saturation, brightness and alpha stays in range
    pub fn assert_colors_valid(list: &DrawList) {
        use pulse_viz_api::Primitive;
        for primitive in list {
            let color = match primitive {
                Primitive::Line { color, .. }
                | Primitive::Polygon { color, .. }
                | Primitive::Disc { color, .. }
                | Primitive::Ellipse { color, .. }
                | Primitive::Rect { color, .. } => color,
            };
            assert!((0.0..360.0).contains(&color.hue), "hue {}", color.hue);
            assert!((0.0..=100.0).contains(&color.saturation));
            assert!((0.0..=100.0).contains(&color.brightness));
            assert!((0.0..=100.0).contains(&color.alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spectrum_index_in_bounds() {
        for len in 1..40 {
            for n in 1..40 {
                for fraction in 1..=4 {
                    for i in 0..n {
                        assert!(spectrum_index(i, n, len, fraction) < len);
                    }
                }
            }
        }
    }

    #[test]
    fn test_spectrum_index_values() {
        // 180 bars over the first half of 512 bins
        assert_eq!(spectrum_index(0, 180, 512, 2), 0);
        assert_eq!(spectrum_index(90, 180, 512, 2), 128);
        assert_eq!(spectrum_index(179, 180, 512, 2), 254);
        // 40 columns over the first quarter
        assert_eq!(spectrum_index(39, 40, 512, 4), 124);
    }

    #[test]
    fn test_spectrum_index_degenerate() {
        assert_eq!(spectrum_index(5, 0, 10, 2), 0);
        assert_eq!(spectrum_index(5, 3, 10, 0), 6);
        assert_eq!(sample_spectrum(&[], 3, 10, 2), 0.0);
    }

    #[test]
    fn test_mode_cycle_wraps() {
        assert_eq!(Mode::Geometry.next(), Mode::Circular);
        assert_eq!(Mode::Circular.next(), Mode::Tunnel);
    }

    #[test]
    fn test_mode_from_number() {
        assert_eq!(Mode::from_number(3), Some(Mode::Field));
        assert_eq!(Mode::from_number(6), Some(Mode::Geometry));
        assert_eq!(Mode::from_number(0), None);
        assert_eq!(Mode::from_number(7), None);
    }

    #[test]
    fn test_every_mode_draws_valid_colors() {
        let renderer = Renderer::new(1);
        let frame = flat_frame(230);
        let scene = scene(&frame);
        let mut rng = StdRng::seed_from_u64(3);

        for mode in Mode::ALL {
            let mut out = DrawList::new();
            renderer.draw(mode, &scene, &mut rng, &mut out);
            assert!(!out.is_empty(), "{} drew nothing", mode.name());
            assert_colors_valid(&out);
        }
    }

    #[test]
    fn test_modes_survive_empty_frame() {
        let renderer = Renderer::new(1);
        let frame = AudioFrame::default();
        let scene = scene(&frame);
        let mut rng = StdRng::seed_from_u64(3);

        for mode in Mode::ALL {
            let mut out = DrawList::new();
            renderer.draw(mode, &scene, &mut rng, &mut out);
            assert_colors_valid(&out);
        }
    }

    #[test]
    fn test_monochrome_scene_has_no_saturation() {
        let frame = flat_frame(150);
        let mut scene = scene(&frame);
        scene.scheme = crate::engine::ColorScheme::by_index(4);
        assert_eq!(scene.color(10.0, 85.0, 90.0, 80.0).saturation, 0.0);
    }
}
