//! Container demuxer contract.

use crate::{
    error::Result,
    media::{ContainerInfo, Packet, SeekRequest, StreamDescriptor},
    platform::PlatformSend,
};

/// An opened container that splits a media resource into per-stream packets.
///
/// Instances are produced by [`MediaBackend::open_input`](crate::backend::MediaBackend::open_input)
/// and exclusively owned by the playback core until [`close`](Demuxer::close)
/// is called. Stream information must already be probed when the demuxer is
/// handed out.
pub trait Demuxer: PlatformSend {
    /// Container-level metadata (bitrate, duration).
    fn container(&self) -> ContainerInfo;

    /// All streams, in ascending index order.
    fn streams(&self) -> &[StreamDescriptor];

    /// Read the next packet.
    ///
    /// Returns `Ok(None)` at end of stream. Errors indicate that the
    /// resource itself can no longer be read.
    fn read_packet(&mut self) -> Result<Option<Packet>>;

    /// Reposition the read cursor.
    ///
    /// Out-of-range targets and unseekable containers are reported as errors;
    /// the core treats any error as an ordinary seek failure.
    fn seek(&mut self, request: SeekRequest) -> Result<()>;

    /// Release the underlying demux context. Called exactly once, after
    /// every decoder opened on this container has been closed.
    fn close(&mut self);
}
