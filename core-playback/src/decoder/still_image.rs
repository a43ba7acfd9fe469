//! Single-shot decode for still images.

use crate::decoder::pipeline::decode_video_packet;
use crate::error::{PlaybackError, Result};
use crate::resource::OpenResource;
use bridge_traits::{MediaFileReader, Packet};
use core_runtime::logging::strip_path;
use std::path::Path;
use tracing::{debug, instrument};

/// Decode the whole file behind `resource` as one picture.
///
/// The file is read in full, wrapped into a single packet for the video
/// stream, decoded once and converted into the video sample. The raw buffer
/// is released when this function returns, on every path.
#[instrument(skip(resource, reader), fields(resource_id = %resource.id, file = %strip_path(&resource.url)))]
pub(crate) fn decode_still(resource: &mut OpenResource, reader: &dyn MediaFileReader) -> Result<()> {
    let Some(stream_index) = resource.video.as_ref().map(|track| track.index) else {
        return Err(PlaybackError::NoUsableStream(resource.url.clone()));
    };

    let raw = reader.read_all(Path::new(&resource.url))?;
    debug!(bytes = raw.len(), "Read still image");

    let packet = Packet::new(stream_index, raw);
    if decode_video_packet(resource, &packet)? {
        Ok(())
    } else {
        Err(PlaybackError::DecodeFailed {
            stream_index,
            reason: "image decoder produced no picture".to_string(),
        })
    }
}
