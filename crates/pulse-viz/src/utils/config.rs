//! Configuration file management.
//!
//! Handles loading and saving user preferences to `~/.pulse-viz.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::EngineConfig;

const DEFAULT_DEVICE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_FFT_SMOOTHING: f32 = 0.8;

const CONFIG_TEMPLATE: &str = r#"# pulse-viz configuration file

# Timeout in seconds when opening an audio device (default: 3)
# device_timeout_secs = 3

# Last selected audio device (auto-saved)
# last_device = "Device Name"
# last_device_is_input = true

# Spectrum smoothing between frames, 0-1 (default: 0.8)
# fft_smoothing = 0.8

# =============================================================================
# Beat Detection
# =============================================================================

# beat_threshold = 200.0   # Bass level (0-255) a beat must exceed
# beat_delta = 30.0        # Minimum bass rise since the previous frame
# particle_batch = 10      # Particles spawned per beat

# =============================================================================
# Motion
# =============================================================================

# shake_threshold = 220.0  # Bass level above which the scene shakes
# shake_amount = 5.0       # Maximum shake offset in pixels
# time_step = 0.01         # Animation clock advance per frame
# hue_step = 0.5           # Hue rotation per frame in degrees
"#;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    pub last_device: Option<String>,
    pub last_device_is_input: Option<bool>,
    pub device_timeout_secs: Option<u64>,
    pub fft_smoothing: Option<f32>,

    // Engine tunables (flattened for simpler TOML)
    pub beat_threshold: Option<f32>,
    pub beat_delta: Option<f32>,
    pub particle_batch: Option<usize>,
    pub shake_threshold: Option<f32>,
    pub shake_amount: Option<f32>,
    pub time_step: Option<f32>,
    pub hue_step: Option<f32>,
}

impl Config {
    fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pulse-viz.toml"))
    }

    /// Loads the user config, falling back to defaults on any failure
    pub fn load() -> Self {
        let path = match Self::path() {
            Some(p) => p,
            None => {
                log::warn!("No home directory; using default config");
                return Self::default();
            }
        };

        // Create template file if it doesn't exist
        if !path.exists() {
            match fs::write(&path, CONFIG_TEMPLATE) {
                Ok(()) => log::info!("Created config template at {:?}", path),
                Err(e) => log::warn!("Could not write config template {:?}: {}", path, e),
            }
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(());
        };
        let content = toml::to_string(self)?;
        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn set_device(&mut self, name: &str, is_input: bool) {
        self.last_device = Some(name.to_string());
        self.last_device_is_input = Some(is_input);
        if let Err(e) = self.save() {
            log::warn!("Could not remember audio device: {}", e);
        }
    }

    pub fn device_timeout_secs(&self) -> u64 {
        self.device_timeout_secs
            .unwrap_or(DEFAULT_DEVICE_TIMEOUT_SECS)
    }

    pub fn fft_smoothing(&self) -> f32 {
        finite_or(self.fft_smoothing, DEFAULT_FFT_SMOOTHING).clamp(0.0, 0.99)
    }

    /// Engine tunables with defaults for anything not configured or not finite
    pub fn engine(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            beat_threshold: finite_or(self.beat_threshold, defaults.beat_threshold),
            beat_delta: finite_or(self.beat_delta, defaults.beat_delta),
            particle_batch: self.particle_batch.unwrap_or(defaults.particle_batch),
            shake_threshold: finite_or(self.shake_threshold, defaults.shake_threshold),
            shake_amount: finite_or(self.shake_amount, defaults.shake_amount).abs(),
            time_step: finite_or(self.time_step, defaults.time_step),
            hue_step: finite_or(self.hue_step, defaults.hue_step),
        }
    }
}

/// TOML accepts `nan` and `inf`; neither is usable as a tunable
fn finite_or(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v,
        Some(v) => {
            log::warn!("Ignoring non-finite config value {}, using {}", v, default);
            default
        }
        None => default,
    }
}
