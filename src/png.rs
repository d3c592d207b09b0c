//! Minimal chunked PNG encoder.
//!
//! Serializes a [`RasterBuffer`] to a standard PNG file without pulling in
//! a full imaging library: a signature, an IHDR chunk, one IDAT chunk of
//! zlib-compressed scanlines (filter type 0 on every line), and an IEND
//! trailer. Only the compress and CRC-32 primitives come from outside, via
//! `flate2`, so they can be swapped for any standard implementation.

use crate::error::{Error, Result};
use crate::model::{PixelFormat, RasterBuffer};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use std::fs;
use std::io::Write;
use std::path::Path;

/// PNG file signature.
const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Color type: truecolor without alpha.
const COLOR_TYPE_RGB: u8 = 2;
/// Color type: truecolor with alpha.
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode a raster buffer as a PNG byte stream.
///
/// Three-channel buffers become truecolor images, four-channel buffers
/// truecolor-with-alpha; either way the pixel data round-trips losslessly
/// through any standard decoder.
pub fn encode(image: &RasterBuffer) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(Error::Encode(
            "cannot encode a zero-dimension image".to_string(),
        ));
    }

    let stride = image.width() as usize * image.channels();
    let height = image.height() as usize;

    // Prefix every scanline with filter type 0 (no per-line filtering).
    let mut raw = Vec::with_capacity((stride + 1) * height);
    for row in image.data().chunks_exact(stride) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let capacity = raw.len() + raw.len() / 10 + 12;
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(capacity), Compression::default());
    encoder
        .write_all(&raw)
        .map_err(|e| Error::Encode(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::Encode(e.to_string()))?;

    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&image.width().to_be_bytes());
    ihdr[4..8].copy_from_slice(&image.height().to_be_bytes());
    ihdr[8] = 8; // bit depth
    ihdr[9] = match image.format() {
        PixelFormat::Rgb => COLOR_TYPE_RGB,
        PixelFormat::Rgba => COLOR_TYPE_RGBA,
    };
    // Bytes 10..13: compression, filter and interlace methods, all 0.

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr);
    write_chunk(&mut out, b"IDAT", &compressed);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

/// Encode and write a raster buffer to `path`.
///
/// A destination that cannot be created is fatal; the error carries the
/// offending path. No atomic-rename protection is attempted.
pub fn write_file<P: AsRef<Path>>(path: P, image: &RasterBuffer) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(image)?;
    fs::write(path, bytes).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize one chunk: big-endian payload length, type tag, payload, and a
/// CRC-32 over the tag and payload only.
fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);

    let mut crc = Crc::new();
    crc.update(tag);
    crc.update(payload);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}
