//! Factory for the demux/decode/convert collaborators.

use crate::{
    codec::Decoder,
    convert::{ConversionSpec, FrameConverter},
    demux::Demuxer,
    error::Result,
    media::StreamDescriptor,
    platform::PlatformSendSync,
};

/// Entry point a host registers to give the core access to a media library.
///
/// # Errors
///
/// Implementations should map their native failures as follows so the core
/// can report precise open failures:
/// - unreadable resource or missing stream info: [`BridgeError::OperationFailed`](crate::BridgeError::OperationFailed)
/// - no decoder for a codec: [`BridgeError::CodecNotFound`](crate::BridgeError::CodecNotFound)
/// - decoder found but not openable: [`BridgeError::CodecOpenFailed`](crate::BridgeError::CodecOpenFailed)
pub trait MediaBackend: PlatformSendSync {
    /// Open a resource and probe its streams.
    fn open_input(&self, url: &str) -> Result<Box<dyn Demuxer>>;

    /// Open a decoder for `stream`.
    fn open_decoder(&self, stream: &StreamDescriptor) -> Result<Box<dyn Decoder>>;

    /// Create a converter for frames described by `spec`.
    fn create_converter(&self, spec: ConversionSpec) -> Result<Box<dyn FrameConverter>>;
}
