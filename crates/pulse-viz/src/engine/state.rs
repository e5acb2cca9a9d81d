//! Visual state shared across ticks and the discrete user commands that change it.

use nannou::geom::{Rect, Vec2};

use super::palette::ColorScheme;
use crate::renderer::Mode;

/// Discrete commands from the host input system, applied between ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NextMode,
    NextScheme,
    /// 1-based mode number (1-6); out-of-range numbers are ignored
    SelectMode(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualState {
    pub mode: Mode,
    scheme_index: usize,
    /// Animation clock, only ever increases
    pub time: f32,
    /// Global hue rotation, kept in [0, 360)
    pub hue_offset: f32,
    /// Pointer distance from center, normalised to [0, 1]
    pub pointer_influence: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            scheme_index: 0,
            time: 0.0,
            hue_offset: 0.0,
            pointer_influence: 0.0,
        }
    }
}

impl VisualState {
    #[cfg(test)]
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn scheme_index(&self) -> usize {
        self.scheme_index
    }

    pub fn scheme(&self) -> &'static ColorScheme {
        ColorScheme::by_index(self.scheme_index)
    }

    /// Advance the clocks by one tick
    pub fn advance(&mut self, time_step: f32, hue_step: f32) {
        self.time += time_step.max(0.0);
        self.hue_offset = pulse_viz_api::wrap_hue(self.hue_offset + hue_step);
    }

    /// Returns whether the command changed anything
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::NextMode => {
                self.mode = self.mode.next();
                true
            }
            Command::NextScheme => {
                self.scheme_index = (self.scheme_index + 1) % ColorScheme::count();
                true
            }
            Command::SelectMode(number) => match Mode::from_number(number) {
                Some(mode) => {
                    self.mode = mode;
                    true
                }
                None => false,
            },
        }
    }
}

/// Pointer distance from the canvas center over half the smaller canvas
/// dimension, clamped to [0, 1]
pub fn pointer_influence(pointer: Vec2, bounds: Rect) -> f32 {
    let half = bounds.w().min(bounds.h()) * 0.5;
    if half <= f32::EPSILON {
        return 0.0;
    }
    let ratio = (pointer - bounds.xy()).length() / half;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}
