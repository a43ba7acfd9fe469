//! # Player Configuration
//!
//! Initial playback settings applied to every resource a player opens.

use crate::cursor::{Direction, LoopMode};
use bridge_traits::PixelFormat;
use serde::{Deserialize, Serialize};

/// Packed layout of [`VideoSample`](crate::VideoSample) buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Rgb24,
    Rgba,
    Bgra,
}

impl OutputFormat {
    pub fn pixel_format(&self) -> PixelFormat {
        match self {
            OutputFormat::Rgb24 => PixelFormat::Rgb24,
            OutputFormat::Rgba => PixelFormat::Rgba,
            OutputFormat::Bgra => PixelFormat::Bgra,
        }
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> u8 {
        match self {
            OutputFormat::Rgb24 => 3,
            OutputFormat::Rgba | OutputFormat::Bgra => 4,
        }
    }
}

/// Player configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Loop behaviour at end of stream.
    ///
    /// Default: no loop.
    #[serde(default)]
    pub loop_mode: LoopMode,

    /// Initial playback direction. Only affects the time-seek flags.
    ///
    /// Default: forward.
    #[serde(default)]
    pub direction: Direction,

    /// Playback speed multiplier used for tick scheduling.
    ///
    /// Default: 1.0.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Layout of the video sample buffer.
    ///
    /// Default: packed RGB24.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Maximum packets read by a single decode round, unlimited when `None`.
    ///
    /// Bounds the work one `update()` can do on streams that interleave long
    /// runs of untracked packets.
    #[serde(default)]
    pub max_packets_per_round: Option<usize>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::default(),
            direction: Direction::default(),
            speed: default_speed(),
            output_format: OutputFormat::default(),
            max_packets_per_round: None,
        }
    }
}

impl PlayerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err("speed must be a finite value > 0".to_string());
        }

        if self.max_packets_per_round == Some(0) {
            return Err("max_packets_per_round must be > 0".to_string());
        }

        Ok(())
    }
}

fn default_speed() -> f64 {
    1.0
}
