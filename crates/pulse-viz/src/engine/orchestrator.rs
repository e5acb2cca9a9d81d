//! Per-tick sequencing of beat detection, particles and the active visual mode.

use nannou::geom::{Rect, Vec2};
use pulse_viz_api::{AudioSource, DrawList};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::beat::BeatDetector;
use super::particles::ParticleSystem;
use super::state::{pointer_influence, Command, VisualState};
use super::EngineConfig;
use crate::renderer::{Mode, Renderer, Scene};
use crate::utils::math::map_amp;

/// Engine lifecycle: nothing renders until the host signals that audio is ready
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Running,
}

/// Everything produced by one tick, ready for a rasterizer
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// Opacity (0-100) of the black trail-fade drawn over the previous frame
    pub fade_alpha: f32,
    /// Camera shake applied to `scene` only
    pub shake: Vec2,
    /// Primitives of the active mode
    pub scene: DrawList,
    /// Particle primitives, drawn unshaken on top
    pub particles: DrawList,
    pub beat: bool,
    pub mode_name: &'static str,
    pub scheme_name: &'static str,
}

pub struct Engine {
    config: EngineConfig,
    status: EngineStatus,
    state: VisualState,
    beat: BeatDetector,
    particles: ParticleSystem,
    renderer: Renderer,
    rng: StdRng,
}

impl Engine {
    /// Engine with an entropy-seeded random source
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Engine whose randomness (particles, shake, twinkle, field noise) is fully determined by `seed`
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, mut rng: StdRng) -> Self {
        let noise_seed = rng.random();
        Self {
            beat: BeatDetector::new(config.beat_threshold, config.beat_delta),
            config,
            status: EngineStatus::Idle,
            state: VisualState::default(),
            particles: ParticleSystem::new(),
            renderer: Renderer::new(noise_seed),
            rng,
        }
    }

    /// Leave the idle state; called once the audio source is ready
    pub fn start(&mut self) {
        if self.status == EngineStatus::Idle {
            log::info!("Engine running");
            self.status = EngineStatus::Running;
        }
    }

    /// Back to idle, e.g. after the audio source failed; a later `start` resumes
    pub fn stop(&mut self) {
        if self.status == EngineStatus::Running {
            log::warn!("Engine stopped");
            self.status = EngineStatus::Idle;
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    #[cfg(test)]
    pub fn state(&self) -> &VisualState {
        &self.state
    }

    #[cfg(test)]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
    }

    pub fn mode_name(&self) -> &'static str {
        self.state.mode.name()
    }

    pub fn scheme_name(&self) -> &'static str {
        self.state.scheme().name
    }

    /// Apply a discrete command between ticks
    pub fn apply(&mut self, command: Command) {
        if self.state.apply(command) {
            log::info!(
                "Mode: {} | Scheme: {}",
                self.mode_name(),
                self.scheme_name()
            );
        }
    }

    /// Run one frame. Returns `None` (and changes nothing) while idle or
    /// when the source has no frame for this tick. A failed source stops
    /// the engine.
    pub fn tick(
        &mut self,
        source: &mut dyn AudioSource,
        pointer: Vec2,
        bounds: Rect,
    ) -> Option<FrameOutput> {
        if !self.is_running() {
            return None;
        }
        if source.has_failed() {
            self.stop();
            return None;
        }
        let frame = source.latest_frame()?;

        self.state
            .advance(self.config.time_step, self.config.hue_step);

        let previous_bass = self.beat.last_bass();
        let beat = self.beat.detect(frame.bass);
        if beat {
            log::trace!(
                "Beat at bass {:.0} (+{:.0})",
                frame.bass,
                frame.bass - previous_bass
            );
            self.particles.spawn(
                &mut self.rng,
                bounds.xy(),
                frame.bass,
                frame.mid,
                self.config.particle_batch,
            );
        }

        let fade_alpha = map_amp(frame.bass, 8.0, 25.0);
        let shake = if frame.bass > self.config.shake_threshold {
            let amount = self.config.shake_amount;
            Vec2::new(
                self.rng.random_range(-amount..=amount),
                self.rng.random_range(-amount..=amount),
            )
        } else {
            Vec2::ZERO
        };

        let scene = Scene {
            frame: &frame,
            scheme: self.state.scheme(),
            time: self.state.time,
            hue_offset: self.state.hue_offset,
            pointer,
            bounds,
        };
        let mut scene_list = DrawList::new();
        self.renderer
            .draw(self.state.mode, &scene, &mut self.rng, &mut scene_list);

        // Dead particles still render their last frame before removal
        let mut particle_list = DrawList::new();
        if !self.particles.is_empty() {
            self.particles.update();
            self.particles
                .render(self.state.hue_offset, &mut particle_list);
            self.particles.prune();
        }

        self.state.pointer_influence = pointer_influence(pointer, bounds);
        log::trace!(
            "Tick: {} particles, pointer influence {:.2}",
            self.particles.len(),
            self.state.pointer_influence
        );

        Some(FrameOutput {
            fade_alpha,
            shake,
            scene: scene_list,
            particles: particle_list,
            beat,
            mode_name: self.mode_name(),
            scheme_name: self.scheme_name(),
        })
    }
}
