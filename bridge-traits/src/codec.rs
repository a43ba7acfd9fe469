//! Codec decoder contract.

use crate::{
    error::Result,
    media::{DecodedFrame, MediaKind, Packet, PixelFormat, SampleFormat},
    platform::PlatformSend,
};

/// Parameters the decoder reports once opened.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecParameters {
    Video {
        width: u32,
        height: u32,
        pixel_format: PixelFormat,
    },
    Audio {
        sample_rate: u32,
        channels: u16,
        sample_format: SampleFormat,
    },
}

impl CodecParameters {
    pub fn kind(&self) -> MediaKind {
        match self {
            CodecParameters::Video { .. } => MediaKind::Video,
            CodecParameters::Audio { .. } => MediaKind::Audio,
        }
    }
}

/// An opened codec context for one stream.
///
/// The decoder owns the frame it last produced; [`frame`](Decoder::frame)
/// borrows it and the borrow is invalidated by the next call to
/// [`decode`](Decoder::decode) or [`flush`](Decoder::flush).
pub trait Decoder: PlatformSend {
    /// Human readable codec name (e.g. "H.264 / AVC / MPEG-4 AVC").
    fn codec_name(&self) -> &str;

    /// Output parameters of the opened codec.
    fn parameters(&self) -> CodecParameters;

    /// Feed one packet.
    ///
    /// Returns `Ok(true)` when a complete frame is available through
    /// [`frame`](Decoder::frame), `Ok(false)` when the packet was accepted but
    /// more input is needed. Errors mean the packet could not be decoded.
    fn decode(&mut self, packet: &Packet) -> Result<bool>;

    /// Most recently completed frame.
    fn frame(&self) -> Option<&DecodedFrame>;

    /// Drop buffered state, typically after a seek.
    fn flush(&mut self);

    /// Release the codec context and any frames it owns.
    fn close(&mut self);
}
