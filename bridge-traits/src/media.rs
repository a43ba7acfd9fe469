//! Media types shared between the playback core and backend adapters.
//!
//! These mirror the vocabulary of common demux/decode libraries (streams,
//! packets, time bases, decoded frames) without tying the core to any one of
//! them. Backend crates translate their native structures into these types.

use bytes::Bytes;
use std::fmt;
use std::ops::BitOr;

/// Sentinel used by containers and decoders for "no timestamp available".
pub const NO_TIMESTAMP: i64 = i64::MIN;

/// Container-level time base: durations and time-seek targets are expressed
/// in microseconds.
pub const CONTAINER_TIME_BASE: i64 = 1_000_000;

// ============================================================================
// Rational / Stream Types
// ============================================================================

/// Fraction used for stream time bases and frame rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Returns `true` when either term is zero.
    pub fn is_degenerate(&self) -> bool {
        self.num == 0 || self.den == 0
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Kind of elementary stream inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
    /// Subtitles, data, attachments and anything else the core ignores.
    Other,
}

/// Description of one stream as reported by the demuxer.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    /// Index of the stream inside the container.
    pub index: usize,
    /// Stream media kind.
    pub kind: MediaKind,
    /// Backend-specific codec identifier (e.g. "h264", "aac").
    pub codec_id: String,
    /// Unit of `duration` and packet timestamps.
    pub time_base: Rational,
    /// Stream duration in `time_base` units, or [`NO_TIMESTAMP`].
    pub duration: i64,
    /// Nominal ("real base") frame rate.
    pub nominal_frame_rate: Rational,
    /// Average frame rate observed by the demuxer.
    pub average_frame_rate: Rational,
    /// Frame count stored in the container, 0 when unknown.
    pub frame_count: u64,
}

impl StreamDescriptor {
    /// Create a descriptor with empty timing metadata.
    pub fn new(index: usize, kind: MediaKind, codec_id: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            codec_id: codec_id.into(),
            time_base: Rational::default(),
            duration: 0,
            nominal_frame_rate: Rational::default(),
            average_frame_rate: Rational::default(),
            frame_count: 0,
        }
    }

    pub fn with_time_base(mut self, time_base: Rational) -> Self {
        self.time_base = time_base;
        self
    }

    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_frame_rates(mut self, nominal: Rational, average: Rational) -> Self {
        self.nominal_frame_rate = nominal;
        self.average_frame_rate = average;
        self
    }

    pub fn with_frame_count(mut self, frame_count: u64) -> Self {
        self.frame_count = frame_count;
        self
    }
}

/// Container-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerInfo {
    /// Short container format name, when the demuxer reports one.
    pub format_name: String,
    /// Overall bitrate in bits per second, 0 when unknown.
    pub bit_rate: i64,
    /// Duration in [`CONTAINER_TIME_BASE`] units, or [`NO_TIMESTAMP`].
    pub duration: i64,
}

/// One compressed unit read from the demuxer.
#[derive(Debug, Clone)]
pub struct Packet {
    /// Stream this packet belongs to.
    pub stream_index: usize,
    /// Compressed payload.
    pub data: Bytes,
    /// Presentation timestamp in stream time base units.
    pub pts: i64,
    /// Decode timestamp in stream time base units.
    pub dts: i64,
    /// Whether the packet starts a keyframe.
    pub keyframe: bool,
}

impl Packet {
    /// Packet carrying no timing information.
    pub fn new(stream_index: usize, data: impl Into<Bytes>) -> Self {
        Self {
            stream_index,
            data: data.into(),
            pts: NO_TIMESTAMP,
            dts: NO_TIMESTAMP,
            keyframe: false,
        }
    }

    pub fn with_timestamps(mut self, pts: i64, dts: i64) -> Self {
        self.pts = pts;
        self.dts = dts;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ============================================================================
// Seek Requests
// ============================================================================

/// Seek behaviour flags, combinable with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeekFlags(u32);

impl SeekFlags {
    pub const NONE: SeekFlags = SeekFlags(0);
    /// Seek to the closest position at or before the target.
    pub const BACKWARD: SeekFlags = SeekFlags(1);
    /// Target is a byte offset.
    pub const BYTE: SeekFlags = SeekFlags(1 << 1);
    /// Allow landing on non-keyframes.
    pub const ANY: SeekFlags = SeekFlags(1 << 2);
    /// Target is a frame number rather than a timestamp.
    pub const FRAME: SeekFlags = SeekFlags(1 << 3);

    pub fn contains(self, other: SeekFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for SeekFlags {
    type Output = SeekFlags;

    fn bitor(self, rhs: SeekFlags) -> SeekFlags {
        SeekFlags(self.0 | rhs.0)
    }
}

/// Seek request handed to [`Demuxer::seek`](crate::demux::Demuxer::seek).
///
/// `min..=max` is the acceptable landing window around `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekRequest {
    /// Stream the timestamps refer to; `None` seeks the whole container in
    /// [`CONTAINER_TIME_BASE`] units.
    pub stream_index: Option<usize>,
    pub min: i64,
    pub target: i64,
    pub max: i64,
    pub flags: SeekFlags,
}

impl SeekRequest {
    /// Exact request with a zero-width window.
    pub fn exact(stream_index: Option<usize>, target: i64, flags: SeekFlags) -> Self {
        Self {
            stream_index,
            min: target,
            target,
            max: target,
            flags,
        }
    }

    /// Request accepting anything within `target ± tolerance`.
    pub fn windowed(
        stream_index: Option<usize>,
        target: i64,
        tolerance: i64,
        flags: SeekFlags,
    ) -> Self {
        Self {
            stream_index,
            min: target.saturating_sub(tolerance),
            target,
            max: target.saturating_add(tolerance),
            flags,
        }
    }
}

// ============================================================================
// Decoded Frames
// ============================================================================

/// Pixel layouts understood by converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed 8-bit R, G, B.
    Rgb24,
    /// Packed 8-bit R, G, B, A.
    Rgba,
    /// Packed 8-bit B, G, R, A.
    Bgra,
    /// Planar 4:2:0: Y plane, quarter-size U and V planes.
    Yuv420p,
    /// Semi-planar 4:2:0: Y plane, interleaved UV plane.
    Nv12,
    /// Any format the core does not know by name.
    Other(i32),
}

impl PixelFormat {
    /// Bytes per pixel for packed formats, `None` for planar ones.
    pub fn packed_bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::Rgb24 => Some(3),
            Self::Rgba | Self::Bgra => Some(4),
            _ => None,
        }
    }

    /// Buffer size for a tightly packed image of this format.
    pub fn buffer_size(&self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        match self {
            Self::Rgb24 => w * h * 3,
            Self::Rgba | Self::Bgra => w * h * 4,
            Self::Yuv420p | Self::Nv12 => w * h + 2 * (w.div_ceil(2) * h.div_ceil(2)),
            Self::Other(_) => 0,
        }
    }
}

/// Audio sample layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    U8,
    S16,
    S32,
    F32,
    F64,
    U8Planar,
    S16Planar,
    S32Planar,
    F32Planar,
    F64Planar,
}

impl SampleFormat {
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::U8 | Self::U8Planar => 1,
            Self::S16 | Self::S16Planar => 2,
            Self::S32 | Self::S32Planar | Self::F32 | Self::F32Planar => 4,
            Self::F64 | Self::F64Planar => 8,
        }
    }

    pub fn is_planar(&self) -> bool {
        matches!(
            self,
            Self::U8Planar | Self::S16Planar | Self::S32Planar | Self::F32Planar | Self::F64Planar
        )
    }
}

/// One plane of image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    pub data: Vec<u8>,
    /// Bytes per row, including padding.
    pub stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self { data, stride }
    }
}

/// A decoded picture, owned by the decoder that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub planes: Vec<Plane>,
    pub pts: i64,
    pub dts: i64,
}

/// A decoded block of audio, owned by the decoder that produced it.
///
/// For planar formats `data` holds the planes back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: SampleFormat,
    /// Samples per channel.
    pub samples: usize,
    pub data: Vec<u8>,
    pub pts: i64,
    pub dts: i64,
}

/// Output of a [`Decoder`](crate::codec::Decoder).
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFrame {
    Video(VideoFrame),
    Audio(AudioFrame),
}

impl DecodedFrame {
    pub fn as_video(&self) -> Option<&VideoFrame> {
        match self {
            DecodedFrame::Video(frame) => Some(frame),
            DecodedFrame::Audio(_) => None,
        }
    }

    pub fn as_audio(&self) -> Option<&AudioFrame> {
        match self {
            DecodedFrame::Audio(frame) => Some(frame),
            DecodedFrame::Video(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_flags_combine() {
        let flags = SeekFlags::FRAME | SeekFlags::ANY | SeekFlags::BACKWARD;
        assert!(flags.contains(SeekFlags::FRAME));
        assert!(flags.contains(SeekFlags::ANY));
        assert!(flags.contains(SeekFlags::BACKWARD));
        assert!(!flags.contains(SeekFlags::BYTE));
        assert!(SeekFlags::NONE.contains(SeekFlags::NONE));
    }

    #[test]
    fn windowed_seek_request_saturates() {
        let request = SeekRequest::windowed(None, i64::MAX - 1, 2_000, SeekFlags::ANY);
        assert_eq!(request.max, i64::MAX);
        assert_eq!(request.min, i64::MAX - 2_001);

        let exact = SeekRequest::exact(Some(0), 42, SeekFlags::FRAME);
        assert_eq!((exact.min, exact.target, exact.max), (42, 42, 42));
    }

    #[test]
    fn pixel_format_buffer_sizes() {
        assert_eq!(PixelFormat::Rgb24.buffer_size(4, 2), 24);
        assert_eq!(PixelFormat::Rgba.buffer_size(4, 2), 32);
        assert_eq!(PixelFormat::Yuv420p.buffer_size(4, 2), 8 + 4);
        assert_eq!(PixelFormat::Yuv420p.buffer_size(3, 3), 9 + 8);
        assert_eq!(PixelFormat::Other(7).buffer_size(4, 4), 0);
    }

    #[test]
    fn sample_format_sizes() {
        assert_eq!(SampleFormat::S16.bytes_per_sample(), 2);
        assert_eq!(SampleFormat::F32Planar.bytes_per_sample(), 4);
        assert!(SampleFormat::F32Planar.is_planar());
        assert!(!SampleFormat::F64.is_planar());
    }

    #[test]
    fn packet_defaults_to_no_timestamp() {
        let packet = Packet::new(1, vec![1u8, 2, 3]);
        assert_eq!(packet.pts, NO_TIMESTAMP);
        assert_eq!(packet.dts, NO_TIMESTAMP);
        assert_eq!(packet.len(), 3);
        assert!(!packet.is_empty());
    }
}
