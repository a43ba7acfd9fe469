//! Seek requests against the open resource.
//!
//! Both operations double as seekability probes: the caller feeds their
//! result into [`SeekMode::record_seek`](crate::SeekMode). Decoders are
//! flushed after every attempt, whether or not the demuxer accepted it.

use crate::cursor::Direction;
use crate::error::{PlaybackError, Result};
use crate::resource::OpenResource;
use bridge_traits::{SeekFlags, SeekRequest, CONTAINER_TIME_BASE};
use tracing::debug;

/// Half-width of the landing window for time seeks, in container units.
pub const TIME_SEEK_TOLERANCE: i64 = 2 * CONTAINER_TIME_BASE / 1000;

/// Seek the primary stream to frame `frame`.
pub(crate) fn seek_to_frame(resource: &mut OpenResource, frame: i64) -> Result<()> {
    if frame < 0 {
        return Err(PlaybackError::SeekFailed(format!(
            "negative frame target {}",
            frame
        )));
    }
    let Some(stream) = resource.primary_stream() else {
        return Err(PlaybackError::SeekFailed(
            "no video or audio stream to seek".to_string(),
        ));
    };

    let request = SeekRequest::exact(
        Some(stream),
        frame,
        SeekFlags::FRAME | SeekFlags::ANY | SeekFlags::BACKWARD,
    );
    let result = demux_seek(resource, request);
    resource.flush_decoders();

    debug!(
        resource_id = %resource.id,
        stream,
        frame,
        ok = result.is_ok(),
        "Frame seek"
    );
    result
}

/// Seek the whole container to `time_ms`.
pub(crate) fn seek_to_time(
    resource: &mut OpenResource,
    time_ms: f64,
    direction: Direction,
) -> Result<()> {
    if resource.primary_stream().is_none() {
        return Err(PlaybackError::SeekFailed(
            "no video or audio stream to seek".to_string(),
        ));
    }
    if !time_ms.is_finite() || time_ms < 0.0 {
        return Err(PlaybackError::SeekFailed(format!(
            "invalid time target {}",
            time_ms
        )));
    }

    let target = (time_ms * (CONTAINER_TIME_BASE as f64 / 1000.0)).round() as i64;
    let flags = match direction {
        Direction::Forward => SeekFlags::ANY,
        Direction::Backward => SeekFlags::ANY | SeekFlags::BACKWARD,
    };
    let request = SeekRequest::windowed(None, target, TIME_SEEK_TOLERANCE, flags);
    let result = demux_seek(resource, request);
    resource.flush_decoders();

    debug!(
        resource_id = %resource.id,
        time_ms,
        target,
        ok = result.is_ok(),
        "Time seek"
    );
    result
}

fn demux_seek(resource: &mut OpenResource, request: SeekRequest) -> Result<()> {
    match resource.demuxer.as_mut() {
        Some(demuxer) => demuxer
            .seek(request)
            .map_err(|e| PlaybackError::SeekFailed(e.to_string())),
        None => Err(PlaybackError::NoResourceLoaded),
    }
}
