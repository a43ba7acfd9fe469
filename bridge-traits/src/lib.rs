//! # Host Bridge Traits
//!
//! Capability contracts between the playback core and the media libraries a
//! host links against.
//!
//! ## Overview
//!
//! The playback core never talks to a demuxer, codec or scaler directly. Each
//! trait in this crate describes one capability the core needs, and a host
//! supplies a concrete implementation (an FFmpeg binding, a pure Rust decoder
//! stack, or a test double).
//!
//! ## Traits
//!
//! ### Media
//! - [`MediaBackend`](backend::MediaBackend) - Opens resources, decoders and converters
//! - [`Demuxer`](demux::Demuxer) - Reads packets and seeks inside a container
//! - [`Decoder`](codec::Decoder) - Turns packets into frames
//! - [`FrameConverter`](convert::FrameConverter) - Converts pictures to a display layout
//!
//! ### Storage
//! - [`MediaFileReader`](storage::MediaFileReader) - Whole-file reads for still images
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Ownership
//!
//! Every handle returned by a [`MediaBackend`](backend::MediaBackend) is
//! exclusively owned by the core and released through its `close` method
//! exactly once. The core closes converters before decoders and decoders
//! before the demuxer; implementations may rely on that order.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should convert native errors to `BridgeError` and include
//! context such as the resource path or codec identifier.
//!
//! ## Thread Safety
//!
//! Native targets require `Send` for handles and `Send + Sync` for factories
//! so that a player can be shared behind a mutex.
//!
//! ## Examples
//!
//! ### Implementing MediaFileReader
//!
//! ```ignore
//! use bridge_traits::storage::MediaFileReader;
//! use bridge_traits::error::Result;
//! use bytes::Bytes;
//!
//! pub struct AssetReader;
//!
//! impl MediaFileReader for AssetReader {
//!     fn read_all(&self, path: &std::path::Path) -> Result<Bytes> {
//!         Ok(std::fs::read(path)?.into())
//!     }
//! }
//! ```

pub mod backend;
pub mod codec;
pub mod convert;
pub mod demux;
pub mod error;
pub mod logging;
pub mod media;
pub mod platform;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use backend::MediaBackend;
pub use codec::{CodecParameters, Decoder};
pub use convert::{ConversionSpec, FrameConverter};
pub use demux::Demuxer;
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use media::{
    AudioFrame, ContainerInfo, DecodedFrame, MediaKind, Packet, PixelFormat, Plane, Rational,
    SampleFormat, SeekFlags, SeekRequest, StreamDescriptor, VideoFrame, CONTAINER_TIME_BASE,
    NO_TIMESTAMP,
};
pub use storage::MediaFileReader;
