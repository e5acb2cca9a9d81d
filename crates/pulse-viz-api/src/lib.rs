//! Shared types for pulse-viz
//!
//! The audio frame the engine consumes and the draw primitives it emits.
//! Kept separate from the engine so audio sources and rasterizers only
//! depend on this crate.

pub mod audio;
pub mod draw;

pub use audio::{AudioFrame, AudioSource, EnergyBand, MAX_AMPLITUDE, SPECTRUM_SIZE};
pub use draw::{wrap_hue, DrawList, Hsba, Primitive};
