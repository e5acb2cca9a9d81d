mod analyzer;
mod error;
mod input;
mod source_pipe;

pub use analyzer::SpectrumAnalyzer;
pub use error::AudioError;
pub use input::AudioInput;
pub use source_pipe::SourcePipe;
