//! Visual engine core: beat detection, particles, color schemes and per-tick sequencing.

pub mod beat;
pub mod palette;
pub mod particles;
pub mod state;
mod orchestrator;

pub use orchestrator::{Engine, FrameOutput};
pub use palette::ColorScheme;
pub use state::Command;

/// Tunables the engine reads every tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Bass level a beat must exceed
    pub beat_threshold: f32,
    /// Minimum bass rise since the previous tick for a beat
    pub beat_delta: f32,
    /// Particles spawned per beat
    pub particle_batch: usize,
    /// Bass level above which the scene shakes
    pub shake_threshold: f32,
    /// Maximum shake offset per axis
    pub shake_amount: f32,
    pub time_step: f32,
    /// Hue rotation per tick, degrees
    pub hue_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            beat_threshold: beat::DEFAULT_THRESHOLD,
            beat_delta: beat::DEFAULT_DELTA,
            particle_batch: 10,
            shake_threshold: 220.0,
            shake_amount: 5.0,
            time_step: 0.01,
            hue_step: 0.5,
        }
    }
}
