//! Pixel format converter contract.

use crate::{
    error::Result,
    media::{PixelFormat, VideoFrame},
    platform::PlatformSend,
};

/// Geometry and layout of the frames a converter is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSpec {
    pub width: u32,
    pub height: u32,
    pub source: PixelFormat,
    pub target: PixelFormat,
}

impl ConversionSpec {
    /// Size of the tightly packed output image.
    pub fn output_size(&self) -> usize {
        self.target.buffer_size(self.width, self.height)
    }
}

/// Converts decoded pictures into a display layout.
pub trait FrameConverter: PlatformSend {
    /// Convert `frame` into `output`, which is exactly
    /// [`ConversionSpec::output_size`] bytes long.
    fn convert(&mut self, frame: &VideoFrame, output: &mut [u8]) -> Result<()>;

    /// Release the scaling context.
    fn close(&mut self);
}
