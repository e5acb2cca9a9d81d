use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No audio devices found")]
    NoDevices,

    #[error("Failed to enumerate audio devices: {0}")]
    Enumerate(#[from] cpal::DevicesError),

    #[error("Device '{device}' config timed out after {secs}s")]
    ConfigTimeout { device: String, secs: u64 },

    #[error("Failed to get device config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to play stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}
