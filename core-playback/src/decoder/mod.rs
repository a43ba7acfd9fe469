//! # Frame Decoding
//!
//! Turns packets from the demuxer into the samples the player exposes.
//!
//! ## Overview
//!
//! - [`pipeline`] runs one decode round: read packets, route them by stream
//!   index to the video or audio decoder, convert pictures into the video
//!   sample buffer
//! - [`still_image`] decodes single-picture resources from the raw file
//! - [`pixel_converter`] is a software `FrameConverter` for backends without
//!   their own scaler
//!
//! ```text
//! Demuxer ─packet─▶ Decoder ─frame─▶ FrameConverter ─▶ VideoSample
//!                      └──────────audio frame─────────▶ AudioSample
//! ```

pub mod pipeline;
pub mod pixel_converter;
pub(crate) mod still_image;

pub use pipeline::RoundOutcome;
pub use pixel_converter::PackedRgbConverter;
