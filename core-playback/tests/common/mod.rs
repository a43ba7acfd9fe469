//! Recording collaborators shared by the integration tests.
//!
//! Packets carry a one-byte opcode that tells the mock decoders what to do:
//! - `V` video picture ready (second byte is the pixel value)
//! - `A` audio block ready (second byte is the sample value)
//! - `N` accepted, no output yet
//! - `X` decode error

#![allow(dead_code)]

use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    AudioFrame, CodecParameters, ContainerInfo, ConversionSpec, DecodedFrame, Decoder, Demuxer,
    FrameConverter, MediaBackend, MediaKind, Packet, PixelFormat, Plane, Rational, SampleFormat,
    SeekRequest, StreamDescriptor, VideoFrame,
};
use core_playback::PackedRgbConverter;
use parking_lot::Mutex;
use std::sync::Arc;

pub const WIDTH: u32 = 4;
pub const HEIGHT: u32 = 2;
pub const AUDIO_SAMPLES: usize = 4;

// ============================================================================
// Call Log
// ============================================================================

#[derive(Debug, Default)]
pub struct CallLog {
    pub seeks: Vec<SeekRequest>,
    pub decodes: Vec<usize>,
    pub flushes: usize,
    pub packets_read: usize,
    pub releases: Vec<&'static str>,
}

pub type SharedLog = Arc<Mutex<CallLog>>;

// ============================================================================
// Scripted Media
// ============================================================================

#[derive(Debug, Clone)]
pub enum Step {
    Packet(Packet),
    ReadError,
}

#[derive(Debug, Clone)]
pub struct MediaScript {
    pub container: ContainerInfo,
    pub streams: Vec<StreamDescriptor>,
    pub steps: Vec<Step>,
    pub seekable: bool,
}

fn video_stream(index: usize, fps: i32, duration_ms: i64) -> StreamDescriptor {
    StreamDescriptor::new(index, MediaKind::Video, "h264")
        .with_time_base(Rational::new(1, 1000))
        .with_duration(duration_ms)
        .with_frame_rates(Rational::new(fps, 1), Rational::new(fps, 1))
}

fn audio_stream(index: usize, duration_ms: i64) -> StreamDescriptor {
    StreamDescriptor::new(index, MediaKind::Audio, "aac")
        .with_time_base(Rational::new(1, 1000))
        .with_duration(duration_ms)
}

pub fn video_packet(index: usize, frame: usize, fps: i32) -> Packet {
    let pts = frame as i64 * 1000 / fps as i64;
    Packet::new(index, vec![b'V', frame as u8]).with_timestamps(pts, pts)
}

pub fn audio_packet(index: usize, value: u8, pts: i64) -> Packet {
    Packet::new(index, vec![b'A', value]).with_timestamps(pts, pts)
}

impl MediaScript {
    /// Video-only clip with an empty container duration.
    pub fn video_only(frames: usize, fps: i32) -> Self {
        let duration_ms = frames as i64 * 1000 / fps as i64;
        Self {
            container: ContainerInfo {
                format_name: "matroska".to_string(),
                bit_rate: 500_000,
                duration: 0,
            },
            streams: vec![video_stream(0, fps, duration_ms)],
            steps: (0..frames)
                .map(|frame| Step::Packet(video_packet(0, frame, fps)))
                .collect(),
            seekable: true,
        }
    }

    /// Interleaved video (stream 0) and audio (stream 1) packets.
    pub fn video_audio(frames: usize, fps: i32) -> Self {
        let duration_ms = frames as i64 * 1000 / fps as i64;
        let mut steps = Vec::new();
        for frame in 0..frames {
            let packet = video_packet(0, frame, fps);
            let pts = packet.pts;
            steps.push(Step::Packet(packet));
            steps.push(Step::Packet(audio_packet(1, frame as u8, pts)));
        }
        Self {
            container: ContainerInfo {
                format_name: "mov,mp4,m4a".to_string(),
                bit_rate: 1_500_000,
                duration: duration_ms * 1000,
            },
            streams: vec![video_stream(0, fps, duration_ms), audio_stream(1, duration_ms)],
            steps,
            seekable: true,
        }
    }

    /// A single PNG picture.
    pub fn still_image() -> Self {
        Self {
            container: ContainerInfo {
                format_name: "png_pipe".to_string(),
                bit_rate: 0,
                duration: 0,
            },
            streams: vec![StreamDescriptor::new(0, MediaKind::Video, "png")],
            steps: Vec::new(),
            seekable: false,
        }
    }

    pub fn unseekable(mut self) -> Self {
        self.seekable = false;
        self
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_streams(mut self, streams: Vec<StreamDescriptor>) -> Self {
        self.streams = streams;
        self
    }
}

// ============================================================================
// Mock Demuxer
// ============================================================================

pub struct MockDemuxer {
    script: MediaScript,
    position: usize,
    log: SharedLog,
}

impl Demuxer for MockDemuxer {
    fn container(&self) -> ContainerInfo {
        self.script.container.clone()
    }

    fn streams(&self) -> &[StreamDescriptor] {
        &self.script.streams
    }

    fn read_packet(&mut self) -> BridgeResult<Option<Packet>> {
        let step = self.script.steps.get(self.position).cloned();
        self.position += 1;
        self.log.lock().packets_read += 1;
        match step {
            None => Ok(None),
            Some(Step::Packet(packet)) => Ok(Some(packet)),
            Some(Step::ReadError) => Err(BridgeError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated file",
            ))),
        }
    }

    fn seek(&mut self, request: SeekRequest) -> BridgeResult<()> {
        self.log.lock().seeks.push(request);
        if !self.script.seekable {
            return Err(BridgeError::OperationFailed("stream is not seekable".into()));
        }

        let steps = &self.script.steps;
        self.position = match request.stream_index {
            // frame seek: land on the n-th packet of the stream, clamped to the end
            Some(stream) => steps
                .iter()
                .enumerate()
                .filter(|(_, step)| matches!(step, Step::Packet(p) if p.stream_index == stream))
                .nth(request.target as usize)
                .map_or(steps.len(), |(position, _)| position),
            // time seek: first packet at or after the window start
            None => steps
                .iter()
                .position(|step| {
                    matches!(step, Step::Packet(p) if p.pts * 1000 >= request.min)
                })
                .unwrap_or(steps.len()),
        };
        Ok(())
    }

    fn close(&mut self) {
        self.log.lock().releases.push("demuxer");
    }
}

// ============================================================================
// Mock Decoder
// ============================================================================

pub struct MockDecoder {
    name: &'static str,
    parameters: CodecParameters,
    frame: Option<DecodedFrame>,
    log: SharedLog,
}

impl Decoder for MockDecoder {
    fn codec_name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> CodecParameters {
        self.parameters.clone()
    }

    fn decode(&mut self, packet: &Packet) -> BridgeResult<bool> {
        self.log.lock().decodes.push(packet.stream_index);
        let value = packet.data.get(1).copied().unwrap_or(0);

        match packet.data.first() {
            Some(b'V') => {
                let CodecParameters::Video { width, height, .. } = self.parameters else {
                    return Err(BridgeError::OperationFailed("not a video codec".into()));
                };
                let stride = width as usize * 3;
                self.frame = Some(DecodedFrame::Video(VideoFrame {
                    width,
                    height,
                    format: PixelFormat::Rgb24,
                    planes: vec![Plane::new(vec![value; stride * height as usize], stride)],
                    pts: packet.pts,
                    dts: packet.dts,
                }));
                Ok(true)
            }
            Some(b'A') => {
                self.frame = Some(DecodedFrame::Audio(AudioFrame {
                    sample_rate: 48_000,
                    channels: 2,
                    format: SampleFormat::S16,
                    samples: AUDIO_SAMPLES,
                    data: vec![value; 2 * AUDIO_SAMPLES * 2],
                    pts: packet.pts,
                    dts: packet.dts,
                }));
                Ok(true)
            }
            Some(b'N') => Ok(false),
            _ => Err(BridgeError::OperationFailed("invalid data found".into())),
        }
    }

    fn frame(&self) -> Option<&DecodedFrame> {
        self.frame.as_ref()
    }

    fn flush(&mut self) {
        self.frame = None;
        self.log.lock().flushes += 1;
    }

    fn close(&mut self) {
        self.frame = None;
        let name = match self.parameters {
            CodecParameters::Video { .. } => "video_decoder",
            CodecParameters::Audio { .. } => "audio_decoder",
        };
        self.log.lock().releases.push(name);
    }
}

// ============================================================================
// Recording Converter
// ============================================================================

pub struct RecordingConverter {
    inner: PackedRgbConverter,
    log: SharedLog,
}

impl FrameConverter for RecordingConverter {
    fn convert(&mut self, frame: &VideoFrame, output: &mut [u8]) -> BridgeResult<()> {
        self.inner.convert(frame, output)
    }

    fn close(&mut self) {
        self.inner.close();
        self.log.lock().releases.push("converter");
    }
}

// ============================================================================
// Mock Backend
// ============================================================================

pub struct MockBackend {
    script: MediaScript,
    log: SharedLog,
    open_failure: bool,
    missing_codec: Option<&'static str>,
    converter_failure: bool,
}

impl MockBackend {
    pub fn new(script: MediaScript) -> Self {
        Self {
            script,
            log: SharedLog::default(),
            open_failure: false,
            missing_codec: None,
            converter_failure: false,
        }
    }

    pub fn with_open_failure(mut self) -> Self {
        self.open_failure = true;
        self
    }

    pub fn with_missing_codec(mut self, codec_id: &'static str) -> Self {
        self.missing_codec = Some(codec_id);
        self
    }

    pub fn with_converter_failure(mut self) -> Self {
        self.converter_failure = true;
        self
    }

    pub fn log(&self) -> SharedLog {
        Arc::clone(&self.log)
    }
}

impl MediaBackend for MockBackend {
    fn open_input(&self, url: &str) -> BridgeResult<Box<dyn Demuxer>> {
        if self.open_failure {
            return Err(BridgeError::OperationFailed(format!("{}: No such file", url)));
        }
        Ok(Box::new(MockDemuxer {
            script: self.script.clone(),
            position: 0,
            log: Arc::clone(&self.log),
        }))
    }

    fn open_decoder(&self, stream: &StreamDescriptor) -> BridgeResult<Box<dyn Decoder>> {
        if self.missing_codec == Some(stream.codec_id.as_str()) {
            return Err(BridgeError::CodecNotFound(stream.codec_id.clone()));
        }

        let (name, parameters) = match stream.kind {
            MediaKind::Video => (
                "H.264 / AVC / MPEG-4 AVC / MPEG-4 part 10",
                CodecParameters::Video {
                    width: WIDTH,
                    height: HEIGHT,
                    pixel_format: PixelFormat::Rgb24,
                },
            ),
            MediaKind::Audio => (
                "AAC (Advanced Audio Coding)",
                CodecParameters::Audio {
                    sample_rate: 48_000,
                    channels: 2,
                    sample_format: SampleFormat::S16,
                },
            ),
            MediaKind::Other => {
                return Err(BridgeError::CodecNotFound(stream.codec_id.clone()));
            }
        };

        Ok(Box::new(MockDecoder {
            name,
            parameters,
            frame: None,
            log: Arc::clone(&self.log),
        }))
    }

    fn create_converter(&self, spec: ConversionSpec) -> BridgeResult<Box<dyn FrameConverter>> {
        if self.converter_failure {
            return Err(BridgeError::NotAvailable("no scaler for format".into()));
        }
        Ok(Box::new(RecordingConverter {
            inner: PackedRgbConverter::new(spec)?,
            log: Arc::clone(&self.log),
        }))
    }
}
