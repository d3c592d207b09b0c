//! Integer box downsampling.

use crate::error::{Error, Result};
use crate::model::{PixelFormat, RasterBuffer};

/// Reduce a buffer by an integer ratio using a box average.
///
/// Every output pixel is the arithmetic mean of its `ratio x ratio` source
/// block, computed per RGB channel with truncating integer division. Source
/// alpha is ignored and the result is always a 3-channel buffer, so the
/// background and every object layer stay pixel-comparable. `ratio == 1` is
/// the exact identity on the RGB channels.
///
/// The source dimensions must be exact multiples of `ratio`.
pub fn downsample(src: &RasterBuffer, ratio: u32) -> Result<RasterBuffer> {
    if ratio == 0 {
        return Err(Error::Other("downsample ratio must be at least 1".to_string()));
    }
    if src.width() % ratio != 0 || src.height() % ratio != 0 {
        return Err(Error::RatioMismatch {
            width: src.width(),
            height: src.height(),
            ratio,
        });
    }

    let out_w = src.width() / ratio;
    let out_h = src.height() / ratio;
    let channels = src.channels();
    let src_w = src.width() as usize;
    let r = ratio as usize;
    let area = (r * r) as u32;
    let data = src.data();

    let mut out = Vec::with_capacity(out_w as usize * out_h as usize * 3);
    for yy in 0..out_h as usize {
        for xx in 0..out_w as usize {
            let mut red = 0u32;
            let mut green = 0u32;
            let mut blue = 0u32;
            for y in 0..r {
                let mut off = ((yy * r + y) * src_w + xx * r) * channels;
                for _ in 0..r {
                    red += data[off] as u32;
                    green += data[off + 1] as u32;
                    blue += data[off + 2] as u32;
                    off += channels;
                }
            }
            out.push((red / area) as u8);
            out.push((green / area) as u8);
            out.push((blue / area) as u8);
        }
    }

    RasterBuffer::from_raw(out_w, out_h, PixelFormat::Rgb, out)
}
