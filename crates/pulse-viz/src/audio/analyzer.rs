//! Spectrum analysis.
//!
//! Turns the most recent block of samples into an `AudioFrame`: a smoothed
//! byte spectrum, the raw waveform, per-band energies and an RMS level.

use num_complex::Complex;
use pulse_viz_api::{AudioFrame, MAX_AMPLITUDE, SPECTRUM_SIZE};
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::utils::math::map_clamped;

/// FFT size; produces `SPECTRUM_SIZE` usable bins
pub const FFT_SIZE: usize = SPECTRUM_SIZE * 2;

/// Decibel range mapped onto 0-255 amplitudes
const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

/// Named frequency ranges, in Hz
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Bass,
    LowMid,
    Mid,
    HighMid,
    Treble,
}

impl Band {
    pub fn range(self) -> (f32, f32) {
        match self {
            Band::Bass => (20.0, 140.0),
            Band::LowMid => (140.0, 400.0),
            Band::Mid => (400.0, 2600.0),
            Band::HighMid => (2600.0, 5200.0),
            Band::Treble => (5200.0, 14000.0),
        }
    }
}

/// Average amplitude of the bins covering `band`, both ends inclusive
pub fn band_energy(spectrum: &[u8], band: Band, sample_rate: f32) -> f32 {
    if spectrum.is_empty() || sample_rate <= 0.0 {
        return 0.0;
    }
    let nyquist = sample_rate / 2.0;
    let last = spectrum.len() - 1;
    let (low_hz, high_hz) = band.range();
    let to_index = |hz: f32| ((hz / nyquist * spectrum.len() as f32).round() as usize).min(last);

    let (low, high) = (to_index(low_hz), to_index(high_hz));
    let bins = &spectrum[low..=high];
    bins.iter().map(|&b| b as f32).sum::<f32>() / bins.len() as f32
}

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_buffer: Vec<Complex<f32>>,
    window: Vec<f32>,
    smoothed: Vec<f32>,
    smoothing: f32,
    sample_rate: f32,
    level: f32,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: f32, smoothing: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Blackman window
        let n = FFT_SIZE as f32;
        let window = (0..FFT_SIZE)
            .map(|i| {
                let x = 2.0 * PI * i as f32 / n;
                0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
            })
            .collect();

        Self {
            fft,
            fft_buffer: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            window,
            smoothed: vec![0.0; SPECTRUM_SIZE],
            smoothing: smoothing.clamp(0.0, 0.99),
            sample_rate,
            level: 0.0,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Analyze the latest samples; only the last `FFT_SIZE` are used and
    /// shorter input is zero-padded at the front.
    pub fn analyze(&mut self, samples: &[f32]) -> AudioFrame {
        let recent = &samples[samples.len().saturating_sub(FFT_SIZE)..];
        let pad = FFT_SIZE - recent.len();

        for (i, slot) in self.fft_buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.fft_buffer);

        let scale = 1.0 / FFT_SIZE as f32;
        let spectrum: Vec<u8> = self
            .smoothed
            .iter_mut()
            .zip(&self.fft_buffer)
            .map(|(smoothed, bin)| {
                let magnitude = bin.norm() * scale;
                *smoothed = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;
                let db = 20.0 * smoothed.max(1e-12).log10();
                map_clamped(db, MIN_DECIBELS, MAX_DECIBELS, 0.0, MAX_AMPLITUDE) as u8
            })
            .collect();

        let rms = if recent.is_empty() {
            0.0
        } else {
            (recent.iter().map(|s| s * s).sum::<f32>() / recent.len() as f32).sqrt()
        };
        self.level = self.smoothing * self.level + (1.0 - self.smoothing) * rms;

        let waveform_start = recent.len().saturating_sub(SPECTRUM_SIZE);
        let mut waveform: Vec<f32> = recent[waveform_start..]
            .iter()
            .map(|s| s.clamp(-1.0, 1.0))
            .collect();
        if waveform.len() < SPECTRUM_SIZE {
            let mut padded = vec![0.0; SPECTRUM_SIZE - waveform.len()];
            padded.append(&mut waveform);
            waveform = padded;
        }

        AudioFrame {
            bass: band_energy(&spectrum, Band::Bass, self.sample_rate),
            mid: band_energy(&spectrum, Band::Mid, self.sample_rate),
            treble: band_energy(&spectrum, Band::Treble, self.sample_rate),
            level: self.level,
            spectrum,
            waveform,
        }
    }
}
