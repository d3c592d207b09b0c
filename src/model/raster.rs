//! Dense pixel buffers exchanged between the renderer, diff and encoder.

use crate::error::{Error, Result};

/// Channel layout of a [`RasterBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three channels: red, green, blue.
    Rgb,
    /// Four channels: red, green, blue, alpha.
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A dense row-major pixel buffer.
///
/// Color values coming out of the rasterizer are alpha-premultiplied; the
/// downsampler and diff operate on the raw channel bytes, so the whole
/// pipeline stays pixel-comparable without any conversion step.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Create a buffer from raw bytes, validating the data length.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(Error::InvalidBuffer(format!(
                "expected {} bytes for {}x{} ({} channels), got {}",
                expected,
                width,
                height,
                format.channels(),
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Create a zero-filled buffer.
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            width,
            height,
            format,
            data: vec![0; len],
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Raw pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Channel bytes of pixel `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let off = self.offset(x, y);
        &self.data[off..off + self.channels()]
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        let ok = RasterBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 12]);
        assert!(ok.is_ok());

        let bad = RasterBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 11]);
        assert!(matches!(bad, Err(Error::InvalidBuffer(_))));
    }

    #[test]
    fn test_pixel_access() {
        let mut data = vec![0u8; 2 * 2 * 4];
        // Pixel (1, 0) red, fully opaque.
        data[4..8].copy_from_slice(&[255, 0, 0, 255]);
        let buf = RasterBuffer::from_raw(2, 2, PixelFormat::Rgba, data).unwrap();
        assert_eq!(buf.pixel(1, 0), &[255, 0, 0, 255]);
        assert_eq!(buf.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_zeroed_empty() {
        let buf = RasterBuffer::zeroed(0, 0, PixelFormat::Rgba);
        assert!(buf.is_empty());
        assert!(buf.data().is_empty());
    }
}
