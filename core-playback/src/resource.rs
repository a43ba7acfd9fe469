//! # Resource Lifecycle
//!
//! Owns every handle acquired for one open media resource and releases them
//! in a fixed order: pixel buffer, converter, video decoder, audio decoder,
//! demuxer.
//!
//! Each handle sits in an `Option` and is taken on release, so
//! `OpenResource::release` is idempotent and runs again harmlessly from
//! `Drop`. A failed open drops the partially built resource, which releases
//! whatever had been acquired up to that point.

use crate::classifier::{classify, ContentSignals, ContentType};
use crate::config::OutputFormat;
use crate::cursor::SeekMode;
use crate::error::{PlaybackError, Result};
use crate::sample::{AudioSample, AudioSampleInfo, VideoSample};
use crate::stream_info::{self, StreamInfo};
use bridge_traits::{
    CodecParameters, ConversionSpec, Decoder, Demuxer, FrameConverter, MediaBackend, MediaKind,
    StreamDescriptor,
};
use core_runtime::logging::redact_url_credentials;
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier attached to log records of one open resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(Uuid);

impl ResourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tracked Streams
// ============================================================================

pub(crate) struct VideoTrack {
    pub index: usize,
    pub decoder: Box<dyn Decoder>,
    pub codec_name: String,
    pub width: u32,
    pub height: u32,
}

pub(crate) struct AudioTrack {
    pub index: usize,
    pub decoder: Box<dyn Decoder>,
    pub codec_name: String,
    pub sample_rate: u32,
    pub channels: u16,
}

fn first_stream_of(streams: &[StreamDescriptor], kind: MediaKind) -> Option<StreamDescriptor> {
    streams
        .iter()
        .filter(|stream| stream.kind == kind)
        .min_by_key(|stream| stream.index)
        .cloned()
}

// ============================================================================
// Open Resource
// ============================================================================

/// All native handles and derived metadata of one open resource.
pub(crate) struct OpenResource {
    pub id: ResourceId,
    pub url: String,
    pub demuxer: Option<Box<dyn Demuxer>>,
    pub video: Option<VideoTrack>,
    pub audio: Option<AudioTrack>,
    pub converter: Option<Box<dyn FrameConverter>>,
    pub video_sample: Option<VideoSample>,
    pub audio_info: Option<AudioSampleInfo>,
    pub info: StreamInfo,
    pub content_type: ContentType,
    pub seek_mode: SeekMode,
}

impl OpenResource {
    /// Open `url` and every collaborator needed to decode it.
    pub fn open(backend: &dyn MediaBackend, url: &str, output: OutputFormat) -> Result<Self> {
        let demuxer = backend
            .open_input(url)
            .map_err(|e| PlaybackError::OpenFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let mut resource = OpenResource {
            id: ResourceId::new(),
            url: url.to_string(),
            demuxer: Some(demuxer),
            video: None,
            audio: None,
            converter: None,
            video_sample: None,
            audio_info: None,
            info: StreamInfo::default(),
            content_type: ContentType::Image,
            seek_mode: SeekMode::Direct,
        };

        let (streams, container) = match resource.demuxer.as_deref() {
            Some(demuxer) => (demuxer.streams().to_vec(), demuxer.container()),
            None => return Err(PlaybackError::NoStreamInfo(url.to_string())),
        };
        if streams.is_empty() {
            return Err(PlaybackError::NoStreamInfo(url.to_string()));
        }

        let video_stream = first_stream_of(&streams, MediaKind::Video);
        let audio_stream = first_stream_of(&streams, MediaKind::Audio);
        if video_stream.is_none() && audio_stream.is_none() {
            return Err(PlaybackError::NoUsableStream(url.to_string()));
        }

        if let Some(stream) = &video_stream {
            resource.open_video(backend, stream, output)?;
        }
        if let Some(stream) = &audio_stream {
            resource.open_audio(backend, stream)?;
        }

        resource.info = stream_info::resolve(&container, video_stream.as_ref().or(audio_stream.as_ref()));

        let signals = ContentSignals {
            has_video: resource.video.is_some(),
            has_audio: resource.audio.is_some(),
            bitrate_kbps: resource.info.bitrate_kbps,
            audio_sample_rate: resource
                .audio
                .as_ref()
                .map_or(0, |track| track.sample_rate as i64),
        };
        resource.content_type =
            classify(signals).ok_or_else(|| PlaybackError::NoUsableStream(url.to_string()))?;
        if resource.content_type.is_image() {
            resource.info.duration_ms = 0.0;
            resource.info.fps = 0.0;
            resource.info.frame_count = 1;
        }

        info!(
            resource_id = %resource.id,
            url = %redact_url_credentials(url),
            format = %container.format_name,
            content = %resource.content_type,
            duration_ms = resource.info.duration_ms,
            fps = resource.info.fps,
            frame_count = resource.info.frame_count,
            bitrate_kbps = resource.info.bitrate_kbps,
            "Opened media resource"
        );

        Ok(resource)
    }

    fn open_video(
        &mut self,
        backend: &dyn MediaBackend,
        stream: &StreamDescriptor,
        output: OutputFormat,
    ) -> Result<()> {
        let decoder = backend
            .open_decoder(stream)
            .map_err(|e| PlaybackError::from_decoder_open(&stream.codec_id, e))?;

        let (width, height, source) = match decoder.parameters() {
            CodecParameters::Video {
                width,
                height,
                pixel_format,
            } => (width, height, pixel_format),
            CodecParameters::Audio { .. } => {
                let mut decoder = decoder;
                decoder.close();
                return Err(PlaybackError::CodecOpenFailed(format!(
                    "decoder for video stream {} reported audio parameters",
                    stream.index
                )));
            }
        };

        debug!(
            resource_id = %self.id,
            stream = stream.index,
            codec = decoder.codec_name(),
            width,
            height,
            "Opened video decoder"
        );

        self.video = Some(VideoTrack {
            index: stream.index,
            codec_name: decoder.codec_name().to_string(),
            decoder,
            width,
            height,
        });

        let spec = ConversionSpec {
            width,
            height,
            source,
            target: output.pixel_format(),
        };
        let converter = backend
            .create_converter(spec)
            .map_err(|e| PlaybackError::ConverterFailed(e.to_string()))?;
        self.converter = Some(converter);
        self.video_sample = Some(VideoSample::new(width, height, output.channels()));

        Ok(())
    }

    fn open_audio(&mut self, backend: &dyn MediaBackend, stream: &StreamDescriptor) -> Result<()> {
        let mut decoder = backend
            .open_decoder(stream)
            .map_err(|e| PlaybackError::from_decoder_open(&stream.codec_id, e))?;

        let (sample_rate, channels) = match decoder.parameters() {
            CodecParameters::Audio {
                sample_rate,
                channels,
                ..
            } => (sample_rate, channels),
            CodecParameters::Video { .. } => {
                decoder.close();
                return Err(PlaybackError::CodecOpenFailed(format!(
                    "decoder for audio stream {} reported video parameters",
                    stream.index
                )));
            }
        };

        debug!(
            resource_id = %self.id,
            stream = stream.index,
            codec = decoder.codec_name(),
            sample_rate,
            channels,
            "Opened audio decoder"
        );

        self.audio = Some(AudioTrack {
            index: stream.index,
            codec_name: decoder.codec_name().to_string(),
            decoder,
            sample_rate,
            channels,
        });

        Ok(())
    }

    /// Stream index seeks are expressed against: video, else audio.
    pub fn primary_stream(&self) -> Option<usize> {
        self.video
            .as_ref()
            .map(|track| track.index)
            .or_else(|| self.audio.as_ref().map(|track| track.index))
    }

    /// Drop decoder state in every open codec.
    pub fn flush_decoders(&mut self) {
        if let Some(video) = self.video.as_mut() {
            video.decoder.flush();
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.decoder.flush();
        }
        self.audio_info = None;
    }

    /// The latest audio block, borrowed from the audio decoder.
    pub fn audio_sample(&self) -> Option<AudioSample<'_>> {
        let info = self.audio_info?;
        let frame = self.audio.as_ref()?.decoder.frame()?.as_audio()?;
        Some(AudioSample::new(info, &frame.data))
    }

    /// Release every handle in teardown order. Safe to call repeatedly.
    pub fn release(&mut self) {
        let mut released = false;

        if self.video_sample.take().is_some() {
            released = true;
        }
        if let Some(mut converter) = self.converter.take() {
            converter.close();
            released = true;
        }
        self.audio_info = None;
        if let Some(mut video) = self.video.take() {
            video.decoder.close();
            released = true;
        }
        if let Some(mut audio) = self.audio.take() {
            audio.decoder.close();
            released = true;
        }
        if let Some(mut demuxer) = self.demuxer.take() {
            demuxer.close();
            released = true;
        }

        if released {
            debug!(
                resource_id = %self.id,
                url = %redact_url_credentials(&self.url),
                "Released media resource"
            );
        }
    }
}

impl Drop for OpenResource {
    fn drop(&mut self) {
        self.release();
    }
}
