//! One decode round: read packets until a tracked stream yields a sample.

use crate::error::{PlaybackError, Result};
use crate::resource::OpenResource;
use crate::sample::{normalize_timestamp, AudioSampleInfo};
use bridge_traits::{DecodedFrame, Packet};
use tracing::trace;

/// How a decode round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The video sample holds a new picture.
    Video,
    /// The audio sample holds a new block.
    Audio,
    /// The demuxer has no more packets.
    EndOfStream,
    /// The per-round packet limit was hit before any sample was produced.
    BudgetExhausted,
}

impl RoundOutcome {
    pub fn produced_sample(&self) -> bool {
        matches!(self, RoundOutcome::Video | RoundOutcome::Audio)
    }
}

/// Read and decode packets until a sample is produced or the stream ends.
///
/// # Errors
///
/// - [`PlaybackError::ReadFailed`] when the demuxer can no longer read
/// - [`PlaybackError::DecodeFailed`] / [`PlaybackError::ConversionFailed`]
///   when a packet of a tracked stream could not be turned into a sample
pub(crate) fn decode_one_round(
    resource: &mut OpenResource,
    max_packets: Option<usize>,
) -> Result<RoundOutcome> {
    let mut packets_read = 0usize;

    loop {
        if max_packets.is_some_and(|limit| packets_read >= limit) {
            return Ok(RoundOutcome::BudgetExhausted);
        }

        let demuxer = resource
            .demuxer
            .as_mut()
            .ok_or(PlaybackError::NoResourceLoaded)?;
        let packet = match demuxer.read_packet() {
            Ok(Some(packet)) => packet,
            Ok(None) => return Ok(RoundOutcome::EndOfStream),
            Err(e) => return Err(PlaybackError::ReadFailed(e.to_string())),
        };
        packets_read += 1;

        let video_index = resource.video.as_ref().map(|track| track.index);
        let audio_index = resource.audio.as_ref().map(|track| track.index);

        if Some(packet.stream_index) == video_index {
            if decode_video_packet(resource, &packet)? {
                return Ok(RoundOutcome::Video);
            }
        } else if Some(packet.stream_index) == audio_index {
            if decode_audio_packet(resource, &packet)? {
                return Ok(RoundOutcome::Audio);
            }
        } else {
            trace!(stream = packet.stream_index, "Skipping packet of untracked stream");
        }
    }
}

/// Decode one video packet and convert the picture into the video sample.
///
/// Returns `Ok(false)` when the decoder needs more input.
pub(crate) fn decode_video_packet(resource: &mut OpenResource, packet: &Packet) -> Result<bool> {
    let OpenResource {
        video,
        converter,
        video_sample,
        ..
    } = resource;

    let (Some(track), Some(converter), Some(sample)) =
        (video.as_mut(), converter.as_mut(), video_sample.as_mut())
    else {
        return Err(PlaybackError::NoResourceLoaded);
    };

    let ready = track
        .decoder
        .decode(packet)
        .map_err(|e| PlaybackError::DecodeFailed {
            stream_index: packet.stream_index,
            reason: e.to_string(),
        })?;
    if !ready {
        return Ok(false);
    }

    let Some(DecodedFrame::Video(frame)) = track.decoder.frame() else {
        return Err(PlaybackError::DecodeFailed {
            stream_index: packet.stream_index,
            reason: "decoder reported a picture but holds none".to_string(),
        });
    };

    converter
        .convert(frame, sample.buffer_mut())
        .map_err(|e| PlaybackError::ConversionFailed(e.to_string()))?;
    sample.publish(frame.pts, frame.dts);

    Ok(true)
}

fn decode_audio_packet(resource: &mut OpenResource, packet: &Packet) -> Result<bool> {
    let OpenResource {
        audio, audio_info, ..
    } = resource;

    let Some(track) = audio.as_mut() else {
        return Err(PlaybackError::NoResourceLoaded);
    };

    let ready = track
        .decoder
        .decode(packet)
        .map_err(|e| PlaybackError::DecodeFailed {
            stream_index: packet.stream_index,
            reason: e.to_string(),
        })?;
    if !ready {
        return Ok(false);
    }

    let Some(DecodedFrame::Audio(frame)) = track.decoder.frame() else {
        return Err(PlaybackError::DecodeFailed {
            stream_index: packet.stream_index,
            reason: "decoder reported audio but holds none".to_string(),
        });
    };

    let size = frame.channels as usize * frame.samples * frame.format.bytes_per_sample();
    *audio_info = Some(AudioSampleInfo {
        sample_rate: frame.sample_rate,
        channels: frame.channels,
        pts: normalize_timestamp(frame.pts),
        dts: normalize_timestamp(frame.dts),
        size,
    });

    Ok(true)
}
