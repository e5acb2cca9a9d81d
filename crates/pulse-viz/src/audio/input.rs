use pulse_viz_api::{AudioFrame, AudioSource};

use super::{AudioError, SourcePipe, SpectrumAnalyzer};
use crate::utils::Config;

/// Live capture plus analysis, pulled once per tick by the engine
pub struct AudioInput {
    pipe: SourcePipe,
    analyzer: SpectrumAnalyzer,
}

impl AudioInput {
    pub fn open(config: &mut Config) -> Result<Self, AudioError> {
        let pipe = SourcePipe::open(config)?;
        let analyzer = SpectrumAnalyzer::new(pipe.sample_rate(), config.fft_smoothing());
        log::info!(
            "Capturing '{}' at {} Hz",
            pipe.device_name(),
            analyzer.sample_rate()
        );
        Ok(Self { pipe, analyzer })
    }
}

impl AudioSource for AudioInput {
    fn latest_frame(&mut self) -> Option<AudioFrame> {
        if !self.pipe.is_live() {
            return None;
        }
        Some(self.analyzer.analyze(&self.pipe.samples()))
    }

    fn has_failed(&self) -> bool {
        self.pipe.has_failed()
    }
}
