//! Layer differencing against the background baseline.

use crate::error::{Error, Result};
use crate::model::{BoundingBox, PixelFormat, RasterBuffer};

/// Result of diffing a layer against the baseline.
#[derive(Debug, Clone)]
pub struct LayerDiff {
    /// Bounding box of the differing pixels, `None` when the layers are
    /// identical.
    pub bbox: Option<BoundingBox>,

    /// RGBA sprite cropped to the bounding box: differing pixels carry the
    /// current layer's color at full opacity, unchanged pixels are
    /// transparent black. A 0x0 buffer when there is no difference.
    pub image: RasterBuffer,
}

/// Compare two equal-size RGB layers and crop out the changed region.
///
/// The bounding box is the minimal axis-aligned rectangle enclosing every
/// pixel whose RGB triple differs between `current` and `baseline`.
/// Deciding whether an empty result is an error is left to the caller: it
/// is expected for the background pass and fatal for a named object.
pub fn diff_layers(current: &RasterBuffer, baseline: &RasterBuffer) -> Result<LayerDiff> {
    if current.format() != PixelFormat::Rgb || baseline.format() != PixelFormat::Rgb {
        return Err(Error::InvalidBuffer(
            "layer diff expects 3-channel RGB buffers".to_string(),
        ));
    }
    if current.width() != baseline.width() || current.height() != baseline.height() {
        return Err(Error::SizeMismatch {
            expected_width: baseline.width(),
            expected_height: baseline.height(),
            actual_width: current.width(),
            actual_height: current.height(),
        });
    }

    let width = current.width() as usize;
    let height = current.height() as usize;
    let cur = current.data();
    let base = baseline.data();

    let mut x0 = width;
    let mut y0 = height;
    let mut x1 = 0usize;
    let mut y1 = 0usize;
    let mut off = 0;
    for y in 0..height {
        for x in 0..width {
            if cur[off..off + 3] != base[off..off + 3] {
                if x < x0 {
                    x0 = x;
                }
                if x > x1 {
                    x1 = x;
                }
                if y < y0 {
                    y0 = y;
                }
                if y > y1 {
                    y1 = y;
                }
            }
            off += 3;
        }
    }

    if x0 > x1 {
        return Ok(LayerDiff {
            bbox: None,
            image: RasterBuffer::zeroed(0, 0, PixelFormat::Rgba),
        });
    }

    let out_w = x1 - x0 + 1;
    let out_h = y1 - y0 + 1;
    let mut out = Vec::with_capacity(out_w * out_h * 4);
    for y in y0..=y1 {
        let mut off = (y * width + x0) * 3;
        for _ in 0..out_w {
            if cur[off..off + 3] != base[off..off + 3] {
                out.extend_from_slice(&cur[off..off + 3]);
                out.push(255);
            } else {
                out.extend_from_slice(&[0, 0, 0, 0]);
            }
            off += 3;
        }
    }

    let image = RasterBuffer::from_raw(out_w as u32, out_h as u32, PixelFormat::Rgba, out)?;
    Ok(LayerDiff {
        bbox: Some(BoundingBox {
            x0: x0 as u32,
            y0: y0 as u32,
            x1: x1 as u32,
            y1: y1 as u32,
        }),
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32) -> RasterBuffer {
        RasterBuffer::zeroed(width, height, PixelFormat::Rgb)
    }

    fn set_pixel(buf: &mut RasterBuffer, x: u32, y: u32, color: [u8; 3]) {
        let off = ((y * buf.width() + x) * 3) as usize;
        buf.data_mut()[off..off + 3].copy_from_slice(&color);
    }

    #[test]
    fn test_identical_layers_yield_empty_diff() {
        let a = rgb(8, 8);
        let b = rgb(8, 8);
        let diff = diff_layers(&a, &b).unwrap();
        assert!(diff.bbox.is_none());
        assert_eq!(diff.image.width(), 0);
        assert_eq!(diff.image.height(), 0);
    }

    #[test]
    fn test_single_pixel_diff() {
        let baseline = rgb(8, 8);
        let mut current = rgb(8, 8);
        set_pixel(&mut current, 3, 4, [200, 10, 10]);

        let diff = diff_layers(&current, &baseline).unwrap();
        let bbox = diff.bbox.unwrap();
        assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (3, 4, 3, 4));
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);
        assert_eq!(diff.image.pixel(0, 0), &[200, 10, 10, 255]);
    }

    #[test]
    fn test_unchanged_pixels_inside_box_are_transparent() {
        // Two differing corners; the pixel between them is unchanged and
        // must come out as transparent black, not baseline color.
        let mut baseline = rgb(8, 8);
        set_pixel(&mut baseline, 1, 1, [9, 9, 9]);
        let mut current = baseline.clone();
        set_pixel(&mut current, 0, 0, [255, 0, 0]);
        set_pixel(&mut current, 2, 2, [0, 0, 255]);

        let diff = diff_layers(&current, &baseline).unwrap();
        let bbox = diff.bbox.unwrap();
        assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (0, 0, 2, 2));
        assert_eq!(diff.image.pixel(0, 0), &[255, 0, 0, 255]);
        assert_eq!(diff.image.pixel(2, 2), &[0, 0, 255, 255]);
        assert_eq!(diff.image.pixel(1, 1), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_diff_copies_current_color_not_baseline() {
        let mut baseline = rgb(4, 4);
        set_pixel(&mut baseline, 2, 2, [50, 60, 70]);
        let mut current = rgb(4, 4);
        set_pixel(&mut current, 2, 2, [80, 90, 100]);

        let diff = diff_layers(&current, &baseline).unwrap();
        assert_eq!(diff.image.pixel(0, 0), &[80, 90, 100, 255]);
    }

    #[test]
    fn test_box_spans_extremes() {
        let baseline = rgb(10, 6);
        let mut current = rgb(10, 6);
        set_pixel(&mut current, 1, 5, [1, 1, 1]);
        set_pixel(&mut current, 9, 0, [2, 2, 2]);

        let diff = diff_layers(&current, &baseline).unwrap();
        let bbox = diff.bbox.unwrap();
        assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (1, 0, 9, 5));
        assert_eq!(diff.image.width(), 9);
        assert_eq!(diff.image.height(), 6);
    }

    #[test]
    fn test_size_mismatch_errors() {
        let a = rgb(8, 8);
        let b = rgb(8, 9);
        assert!(matches!(
            diff_layers(&a, &b),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_rgba_input_rejected() {
        let a = RasterBuffer::zeroed(4, 4, PixelFormat::Rgba);
        let b = rgb(4, 4);
        assert!(matches!(
            diff_layers(&a, &b),
            Err(Error::InvalidBuffer(_))
        ));
    }
}
