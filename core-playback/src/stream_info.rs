//! Authoritative timing derived from container and stream metadata.
//!
//! Containers disagree about where duration and frame rate live and often
//! leave one of the fields empty, so each value is resolved from a preferred
//! field with a fallback.

use crate::time::{r2d, sanitize_timestamp, EPS};
use bridge_traits::{ContainerInfo, StreamDescriptor, CONTAINER_TIME_BASE};

/// Resolved timing for one open resource. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamInfo {
    pub duration_ms: f64,
    pub fps: f64,
    pub frame_count: u64,
    /// Overall bitrate in kbit/s.
    pub bitrate_kbps: i64,
}

/// Resolve timing from the container and the primary stream (video, else
/// audio).
///
/// Never fails. Without a primary stream only the bitrate is filled in.
pub fn resolve(container: &ContainerInfo, primary: Option<&StreamDescriptor>) -> StreamInfo {
    let bitrate_kbps = container.bit_rate.max(0) / 1000;

    let Some(stream) = primary else {
        return StreamInfo {
            bitrate_kbps,
            ..StreamInfo::default()
        };
    };

    let mut duration_secs =
        sanitize_timestamp(container.duration) as f64 / CONTAINER_TIME_BASE as f64;
    if duration_secs < EPS {
        duration_secs = sanitize_timestamp(stream.duration) as f64 * r2d(stream.time_base);
    }
    let duration_ms = (duration_secs * 1000.0).max(0.0);

    let mut fps = r2d(stream.nominal_frame_rate);
    if fps < EPS {
        fps = r2d(stream.average_frame_rate);
    }
    let fps = fps.max(0.0);

    let frame_count = if stream.frame_count > 0 {
        stream.frame_count
    } else {
        (duration_ms / 1000.0 * fps).floor() as u64
    };

    StreamInfo {
        duration_ms,
        fps,
        frame_count,
        bitrate_kbps,
    }
}
