//! Audio device capture and stream management.
//!
//! Handles audio input from system devices using cpal, managing device enumeration,
//! stream creation, and a ring buffer for sample storage.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::AudioError;
use crate::utils::Config;

pub const BUFFER_SIZE: usize = 1024;

pub struct DeviceInfo {
    pub device: Device,
    pub name: String,
    pub is_input: bool,
}

impl DeviceInfo {
    fn kind(&self) -> &'static str {
        if self.is_input {
            "input"
        } else {
            "output"
        }
    }
}

pub struct SourcePipe {
    buffer: Arc<Mutex<VecDeque<f32>>>,
    /// Set by the callback once samples arrive
    live: Arc<AtomicBool>,
    /// Set by the stream error callback
    failed: Arc<AtomicBool>,
    sample_rate: f32,
    device_name: String,
    _stream: Stream,
}

impl SourcePipe {
    /// Opens the remembered device, else a preferred one, and starts capture
    pub fn open(config: &mut Config) -> Result<Self, AudioError> {
        let devices = Self::collect_devices()?;
        if devices.is_empty() {
            return Err(AudioError::NoDevices);
        }
        let index = Self::preferred_device(&devices, config);
        let info = &devices[index];
        log::info!("[{}] Selected: {} ({})", index, info.name, info.kind());

        let timeout = Duration::from_secs(config.device_timeout_secs());
        let stream_config = Self::get_config_with_timeout(info, timeout)?;
        let sample_rate = stream_config.sample_rate.0 as f32;

        let buffer = Arc::new(Mutex::new(VecDeque::with_capacity(BUFFER_SIZE)));
        let live = Arc::new(AtomicBool::new(false));
        let failed = Arc::new(AtomicBool::new(false));
        let stream = Self::build_stream(
            info,
            &stream_config,
            Arc::clone(&buffer),
            Arc::clone(&live),
            Arc::clone(&failed),
        )?;

        if config.last_device.as_deref() != Some(info.name.as_str())
            || config.last_device_is_input != Some(info.is_input)
        {
            config.set_device(&info.name, info.is_input);
        }

        Ok(Self {
            buffer,
            live,
            failed,
            sample_rate,
            device_name: info.name.clone(),
            _stream: stream,
        })
    }

    /// Names of every capture candidate, inputs first
    pub fn list_devices() -> Result<Vec<(String, bool)>, AudioError> {
        Ok(Self::collect_devices()?
            .into_iter()
            .map(|d| (d.name, d.is_input))
            .collect())
    }

    fn collect_devices() -> Result<Vec<DeviceInfo>, AudioError> {
        let host = cpal::default_host();
        let mut devices = Vec::new();

        for device in host.input_devices()? {
            if let Ok(name) = device.name() {
                devices.push(DeviceInfo {
                    device,
                    name,
                    is_input: true,
                });
            }
        }

        for device in host.output_devices()? {
            if let Ok(name) = device.name() {
                devices.push(DeviceInfo {
                    device,
                    name,
                    is_input: false,
                });
            }
        }

        Ok(devices)
    }

    fn preferred_device(devices: &[DeviceInfo], config: &Config) -> usize {
        config
            .last_device
            .as_ref()
            .and_then(|name| {
                let is_input = config.last_device_is_input.unwrap_or(false);
                devices
                    .iter()
                    .position(|d| d.name == *name && d.is_input == is_input)
            })
            // pipewire or pulse inputs are the most reliable on Linux
            .or_else(|| devices.iter().position(|d| d.is_input && d.name == "pipewire"))
            .or_else(|| devices.iter().position(|d| d.is_input && d.name == "pulse"))
            .or_else(|| {
                // Default output for loopback capture
                let host = cpal::default_host();
                let default_output = host.default_output_device().and_then(|d| d.name().ok());
                default_output
                    .and_then(|name| devices.iter().position(|d| !d.is_input && d.name == name))
            })
            .unwrap_or(0)
    }

    /// Get device config with timeout (the config call often hangs on bad devices)
    fn get_config_with_timeout(
        info: &DeviceInfo,
        timeout: Duration,
    ) -> Result<StreamConfig, AudioError> {
        let device = info.device.clone();
        let is_input = info.is_input;
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let config = if is_input {
                device.default_input_config()
            } else {
                device.default_output_config()
            };
            let _ = tx.send(config);
        });

        match rx.recv_timeout(timeout) {
            Ok(config) => Ok(config?.into()),
            Err(_) => Err(AudioError::ConfigTimeout {
                device: info.name.clone(),
                secs: timeout.as_secs(),
            }),
        }
    }

    fn build_stream(
        info: &DeviceInfo,
        stream_config: &StreamConfig,
        buffer: Arc<Mutex<VecDeque<f32>>>,
        live: Arc<AtomicBool>,
        failed: Arc<AtomicBool>,
    ) -> Result<Stream, AudioError> {
        let channels = (stream_config.channels as usize).max(1);

        let stream = info.device.build_input_stream(
            stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let Ok(mut buffer) = buffer.lock() else {
                    return;
                };
                // Down-mix to mono
                for chunk in data.chunks(channels) {
                    if buffer.len() == BUFFER_SIZE {
                        buffer.pop_front();
                    }
                    buffer.push_back(chunk.iter().sum::<f32>() / chunk.len() as f32);
                }
                live.store(true, Ordering::Relaxed);
            },
            move |err| {
                log::error!("Audio stream error: {}", err);
                failed.store(true, Ordering::Relaxed);
            },
            None,
        )?;
        stream.play()?;
        Ok(stream)
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Whether samples have arrived yet
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }

    /// Whether the stream reported an error; it will not recover
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    /// Snapshot of the ring buffer, oldest sample first
    pub fn samples(&self) -> Vec<f32> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.iter().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}
