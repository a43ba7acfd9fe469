//! Decoded samples exposed to the host.

use bridge_traits::NO_TIMESTAMP;

/// Map the "no timestamp" sentinel to 0.
pub fn normalize_timestamp(value: i64) -> i64 {
    if value == NO_TIMESTAMP {
        0
    } else {
        value
    }
}

/// The latest decoded picture in packed RGB.
///
/// A single buffer is reused for every decode; its contents are overwritten
/// by the next successful video decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSample {
    width: u32,
    height: u32,
    channels: u8,
    pts: i64,
    dts: i64,
    generation: u64,
    data: Vec<u8>,
}

impl VideoSample {
    pub(crate) fn new(width: u32, height: u32, channels: u8) -> Self {
        let size = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            pts: 0,
            dts: 0,
            generation: 0,
            data: vec![0; size],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pts(&self) -> i64 {
        self.pts
    }

    pub fn dts(&self) -> i64 {
        self.dts
    }

    /// Number of pictures written into this buffer so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pixel rows, tightly packed (`width * channels` bytes each).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Record a completed write of a new picture.
    pub(crate) fn publish(&mut self, pts: i64, dts: i64) {
        self.pts = normalize_timestamp(pts);
        self.dts = normalize_timestamp(dts);
        self.generation += 1;
    }
}

/// Metadata of the latest decoded audio block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AudioSampleInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub pts: i64,
    pub dts: i64,
    pub size: usize,
}

/// The latest decoded audio block.
///
/// Borrows the decoder-owned buffer through the player, so it cannot outlive
/// the next decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSample<'a> {
    sample_rate: u32,
    channels: u16,
    pts: i64,
    dts: i64,
    data: &'a [u8],
}

impl<'a> AudioSample<'a> {
    pub(crate) fn new(info: AudioSampleInfo, data: &'a [u8]) -> Self {
        let len = info.size.min(data.len());
        Self {
            sample_rate: info.sample_rate,
            channels: info.channels,
            pts: info.pts,
            dts: info.dts,
            data: &data[..len],
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn pts(&self) -> i64 {
        self.pts
    }

    pub fn dts(&self) -> i64 {
        self.dts
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
