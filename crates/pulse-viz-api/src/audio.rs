//! Per-tick audio analysis data handed to the engine.

/// Number of spectrum bins produced by the analyzer
pub const SPECTRUM_SIZE: usize = 512;

/// Upper bound of spectrum amplitudes and band energies
pub const MAX_AMPLITUDE: f32 = 255.0;

/// One frame of audio analysis, produced by the audio collaborator once per tick.
///
/// Read-only to the engine and never retained across ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioFrame {
    /// Per-bin amplitudes, 0-255
    pub spectrum: Vec<u8>,

    /// Raw time-domain samples, -1 to 1
    pub waveform: Vec<f32>,

    /// Bass energy (0-255)
    pub bass: f32,

    /// Mid energy (0-255)
    pub mid: f32,

    /// Treble energy (0-255)
    pub treble: f32,

    /// Overall input level (RMS)
    pub level: f32,
}

impl AudioFrame {
    /// A frame of silence with full-length spectrum and waveform
    pub fn silent() -> Self {
        Self {
            spectrum: vec![0; SPECTRUM_SIZE],
            waveform: vec![0.0; SPECTRUM_SIZE],
            ..Self::default()
        }
    }

    /// Energy of a band as used by the visual modes
    pub fn energy(&self, band: EnergyBand) -> f32 {
        match band {
            EnergyBand::Bass => self.bass,
            EnergyBand::Mid => self.mid,
            EnergyBand::Treble => self.treble,
        }
    }
}

/// The three aggregate bands the visual modes react to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyBand {
    Bass,
    Mid,
    Treble,
}

/// Synchronous "latest frame" pull implemented by the audio collaborator.
///
/// Returns `None` while no frame is available; the engine skips that tick.
pub trait AudioSource {
    fn latest_frame(&mut self) -> Option<AudioFrame>;

    /// Whether the source broke and will never produce frames again
    fn has_failed(&self) -> bool {
        false
    }
}
