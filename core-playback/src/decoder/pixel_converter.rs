//! Software conversion of decoded pictures to packed RGB layouts.
//!
//! Backends without a native scaler can hand out [`PackedRgbConverter`] from
//! `MediaBackend::create_converter`. YUV sources use BT.601 limited-range
//! coefficients in 8.8 fixed point.

use bridge_traits::{
    error::{BridgeError, Result},
    ConversionSpec, FrameConverter, PixelFormat, VideoFrame,
};

/// Converter from RGB24/RGBA/BGRA/YUV420P/NV12 to RGB24/RGBA/BGRA.
///
/// Does not scale: the frame must match the geometry it was created for.
#[derive(Debug)]
pub struct PackedRgbConverter {
    spec: ConversionSpec,
    closed: bool,
}

impl PackedRgbConverter {
    pub fn new(spec: ConversionSpec) -> Result<Self> {
        if !Self::supports_source(spec.source) {
            return Err(BridgeError::NotAvailable(format!(
                "no software conversion from {:?}",
                spec.source
            )));
        }
        if !matches!(
            spec.target,
            PixelFormat::Rgb24 | PixelFormat::Rgba | PixelFormat::Bgra
        ) {
            return Err(BridgeError::NotAvailable(format!(
                "no software conversion to {:?}",
                spec.target
            )));
        }
        if spec.width == 0 || spec.height == 0 {
            return Err(BridgeError::OperationFailed(format!(
                "invalid frame geometry {}x{}",
                spec.width, spec.height
            )));
        }
        Ok(Self {
            spec,
            closed: false,
        })
    }

    pub fn supports_source(format: PixelFormat) -> bool {
        matches!(
            format,
            PixelFormat::Rgb24
                | PixelFormat::Rgba
                | PixelFormat::Bgra
                | PixelFormat::Yuv420p
                | PixelFormat::Nv12
        )
    }

    pub fn spec(&self) -> ConversionSpec {
        self.spec
    }

    fn write_pixel(&self, output: &mut [u8], pixel: usize, rgb: [u8; 3]) {
        match self.spec.target {
            PixelFormat::Rgb24 => {
                output[pixel * 3..pixel * 3 + 3].copy_from_slice(&rgb);
            }
            PixelFormat::Rgba => {
                output[pixel * 4..pixel * 4 + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
            }
            PixelFormat::Bgra => {
                output[pixel * 4..pixel * 4 + 4].copy_from_slice(&[rgb[2], rgb[1], rgb[0], 255]);
            }
            _ => {}
        }
    }

    fn read_pixel(&self, frame: &VideoFrame, x: usize, y: usize) -> Result<[u8; 3]> {
        let plane = |index: usize| {
            frame.planes.get(index).ok_or_else(|| {
                BridgeError::OperationFailed(format!("frame is missing plane {}", index))
            })
        };
        let byte = |index: usize, offset: usize| -> Result<u8> {
            plane(index)?.data.get(offset).copied().ok_or_else(|| {
                BridgeError::OperationFailed(format!("plane {} is too short", index))
            })
        };

        match frame.format {
            PixelFormat::Rgb24 => {
                let offset = y * plane(0)?.stride + x * 3;
                Ok([byte(0, offset)?, byte(0, offset + 1)?, byte(0, offset + 2)?])
            }
            PixelFormat::Rgba => {
                let offset = y * plane(0)?.stride + x * 4;
                Ok([byte(0, offset)?, byte(0, offset + 1)?, byte(0, offset + 2)?])
            }
            PixelFormat::Bgra => {
                let offset = y * plane(0)?.stride + x * 4;
                Ok([byte(0, offset + 2)?, byte(0, offset + 1)?, byte(0, offset)?])
            }
            PixelFormat::Yuv420p => {
                let luma = byte(0, y * plane(0)?.stride + x)?;
                let u = byte(1, (y / 2) * plane(1)?.stride + x / 2)?;
                let v = byte(2, (y / 2) * plane(2)?.stride + x / 2)?;
                Ok(yuv_to_rgb(luma, u, v))
            }
            PixelFormat::Nv12 => {
                let luma = byte(0, y * plane(0)?.stride + x)?;
                let chroma = (y / 2) * plane(1)?.stride + (x / 2) * 2;
                Ok(yuv_to_rgb(luma, byte(1, chroma)?, byte(1, chroma + 1)?))
            }
            other => Err(BridgeError::NotAvailable(format!(
                "no software conversion from {:?}",
                other
            ))),
        }
    }
}

impl FrameConverter for PackedRgbConverter {
    fn convert(&mut self, frame: &VideoFrame, output: &mut [u8]) -> Result<()> {
        if self.closed {
            return Err(BridgeError::OperationFailed(
                "converter already closed".to_string(),
            ));
        }
        if frame.width != self.spec.width
            || frame.height != self.spec.height
            || frame.format != self.spec.source
        {
            return Err(BridgeError::OperationFailed(format!(
                "frame {}x{} {:?} does not match converter {}x{} {:?}",
                frame.width,
                frame.height,
                frame.format,
                self.spec.width,
                self.spec.height,
                self.spec.source
            )));
        }
        if output.len() != self.spec.output_size() {
            return Err(BridgeError::OperationFailed(format!(
                "output buffer is {} bytes, expected {}",
                output.len(),
                self.spec.output_size()
            )));
        }

        let width = self.spec.width as usize;
        for y in 0..self.spec.height as usize {
            for x in 0..width {
                let rgb = self.read_pixel(frame, x, y)?;
                self.write_pixel(output, y * width + x, rgb);
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;

    let r = (298 * c + 409 * e + 128) >> 8;
    let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
    let b = (298 * c + 516 * d + 128) >> 8;

    [clamp(r), clamp(g), clamp(b)]
}

fn clamp(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::Plane;

    fn spec(source: PixelFormat, target: PixelFormat) -> ConversionSpec {
        ConversionSpec {
            width: 2,
            height: 2,
            source,
            target,
        }
    }

    fn frame(format: PixelFormat, planes: Vec<Plane>) -> VideoFrame {
        VideoFrame {
            width: 2,
            height: 2,
            format,
            planes,
            pts: 0,
            dts: 0,
        }
    }

    #[test]
    fn rejects_unsupported_formats() {
        assert!(PackedRgbConverter::new(spec(PixelFormat::Other(99), PixelFormat::Rgb24)).is_err());
        assert!(PackedRgbConverter::new(spec(PixelFormat::Rgb24, PixelFormat::Nv12)).is_err());
    }

    #[test]
    fn bgra_to_rgb24_swaps_channels_and_honours_stride() {
        let mut converter =
            PackedRgbConverter::new(spec(PixelFormat::Bgra, PixelFormat::Rgb24)).unwrap();
        // 2 pixels per row plus 4 bytes of padding
        let data = vec![
            1, 2, 3, 255, 4, 5, 6, 255, 0, 0, 0, 0, //
            7, 8, 9, 255, 10, 11, 12, 255, 0, 0, 0, 0,
        ];
        let input = frame(PixelFormat::Bgra, vec![Plane::new(data, 12)]);
        let mut output = vec![0u8; 12];

        converter.convert(&input, &mut output).unwrap();
        assert_eq!(output, vec![3, 2, 1, 6, 5, 4, 9, 8, 7, 12, 11, 10]);
    }

    #[test]
    fn yuv420p_black_and_white() {
        let mut converter =
            PackedRgbConverter::new(spec(PixelFormat::Yuv420p, PixelFormat::Rgb24)).unwrap();
        let input = frame(
            PixelFormat::Yuv420p,
            vec![
                Plane::new(vec![16, 235, 16, 235], 2),
                Plane::new(vec![128], 1),
                Plane::new(vec![128], 1),
            ],
        );
        let mut output = vec![0u8; 12];

        converter.convert(&input, &mut output).unwrap();
        assert_eq!(&output[0..3], &[0, 0, 0]);
        assert_eq!(&output[3..6], &[255, 255, 255]);
    }

    #[test]
    fn nv12_to_rgba_sets_opaque_alpha() {
        let mut converter =
            PackedRgbConverter::new(spec(PixelFormat::Nv12, PixelFormat::Rgba)).unwrap();
        let input = frame(
            PixelFormat::Nv12,
            vec![Plane::new(vec![235; 4], 2), Plane::new(vec![128, 128], 2)],
        );
        let mut output = vec![0u8; 16];

        converter.convert(&input, &mut output).unwrap();
        assert!(output.chunks(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn mismatched_geometry_and_short_planes_fail() {
        let mut converter =
            PackedRgbConverter::new(spec(PixelFormat::Rgb24, PixelFormat::Rgb24)).unwrap();
        let mut output = vec![0u8; 12];

        let mut wrong_size = frame(PixelFormat::Rgb24, vec![Plane::new(vec![0; 12], 6)]);
        wrong_size.width = 3;
        assert!(converter.convert(&wrong_size, &mut output).is_err());

        let short = frame(PixelFormat::Rgb24, vec![Plane::new(vec![0; 4], 6)]);
        assert!(converter.convert(&short, &mut output).is_err());
    }

    #[test]
    fn closed_converter_refuses_work() {
        let mut converter =
            PackedRgbConverter::new(spec(PixelFormat::Rgb24, PixelFormat::Rgb24)).unwrap();
        converter.close();
        let input = frame(PixelFormat::Rgb24, vec![Plane::new(vec![0; 12], 6)]);
        assert!(converter.convert(&input, &mut [0u8; 12]).is_err());
    }
}
