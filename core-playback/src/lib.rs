//! # Playback Orchestration
//!
//! Drives a single media resource (video, audio or still image) through
//! demuxing, decoding, pixel conversion and seeking, and keeps the playback
//! position consistent across play/pause/stop/seek.
//!
//! ## Overview
//!
//! This crate handles:
//! - Content classification and timing resolution from container metadata
//! - Decode rounds that route packets to the video or audio decoder
//! - Seekability probing with a one-way fallback to sequential decoding
//! - A one-shot decode path for still images
//! - Ordered release of every native handle
//!
//! The demuxer, decoders and converters themselves are supplied by the host
//! through the `bridge-traits` contracts registered in
//! [`CoreConfig`](core_runtime::config::CoreConfig).

pub mod classifier;
pub mod config;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod player;
pub mod resource;
pub mod sample;
pub mod stream_info;
pub mod time;

mod seek;

pub use classifier::{classify, ContentSignals, ContentType};
pub use config::{OutputFormat, PlayerConfig};
pub use cursor::{Direction, LoopMode, PlaybackCursor, PlaybackState, SeekMode};
pub use decoder::{PackedRgbConverter, RoundOutcome};
pub use error::{PlaybackError, Result};
pub use player::{MediaPlayer, SharedMediaPlayer};
pub use resource::ResourceId;
pub use sample::{AudioSample, VideoSample};
pub use seek::TIME_SEEK_TOLERANCE;
pub use stream_info::StreamInfo;
pub use time::EPS;
