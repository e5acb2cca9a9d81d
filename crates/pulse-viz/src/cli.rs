//! Command-line argument parsing.

use clap::Parser;

use crate::renderer::Mode;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "pulse-viz")]
#[command(about = "Audio-reactive visualizer with six modes and beat-spawned particles", long_about = None)]
pub struct Args {
    /// Run in a window instead of fullscreen
    #[arg(short, long)]
    pub windowed: bool,

    /// Print the available audio devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Seed for particles, shake, twinkle and field noise
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Initial mode: 1 Circular, 2 Tunnel, 3 Field, 4 Bars, 5 Galaxy, 6 Geometry
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub mode: u8,
}

impl Args {
    pub fn initial_mode(&self) -> Mode {
        Mode::from_number(self.mode as usize).unwrap_or_default()
    }
}
