mod config;
pub mod math;

pub use config::{Config, ConfigError};
