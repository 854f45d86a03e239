use crate::config::{CloudConfig, ConfigError};
use crate::layout::Pattern;
use crate::typeface::DEFAULT_FACE;
use clap::Parser;
use std::path::PathBuf;

/// Animated 3D word cloud for the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "wordsphere", version, about, long_about = None)]
pub(crate) struct Args {
    /// Labels per ring and number of rings (2..=30)
    #[arg(long, default_value_t = 12)]
    pub(crate) count: usize,

    /// Sphere radius in world units (10..=100)
    #[arg(long, default_value_t = 20.0)]
    pub(crate) radius: f32,

    /// Angular speed multiplier for the animation (0.1..=10)
    #[arg(long, default_value_t = 1.2)]
    pub(crate) frequency: f32,

    /// Let the sphere radius breathe over time
    #[arg(long, default_value_t = false)]
    pub(crate) radius_pattern: bool,

    /// Sweep the rings' polar angles over time
    #[arg(long, default_value_t = false)]
    pub(crate) phi_pattern: bool,

    /// Swing the azimuth back and forth instead of spinning
    #[arg(long, default_value_t = false)]
    pub(crate) theta_pattern: bool,

    /// Billboard words instead of turning each one towards the camera
    #[arg(long, default_value_t = false)]
    pub(crate) no_look_at: bool,

    /// Seed for words and colors (random when omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Glyph face: plain, runic, smallcaps
    #[arg(long, default_value = DEFAULT_FACE)]
    pub(crate) font: String,

    /// FPS cap
    #[arg(long, default_value_t = 60)]
    pub(crate) fps: u32,

    /// Write logs to this file (the screen belongs to the animation)
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Log filter, e.g. info, debug, wordsphere=trace (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
}

impl Args {
    pub(crate) fn cloud_config(&self) -> Result<CloudConfig, ConfigError> {
        CloudConfig {
            count: self.count,
            radius: self.radius,
            look_at_camera: !self.no_look_at,
            pattern: Pattern {
                radius: self.radius_pattern,
                phi: self.phi_pattern,
                theta: self.theta_pattern,
            },
            frequency: self.frequency,
        }
        .validate()
    }
}

pub(crate) fn parse() -> Args {
    Args::parse()
}
