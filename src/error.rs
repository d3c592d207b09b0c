//! Error types for the svgslice library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for svgslice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while slicing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document could not be opened or read.
    #[error("cannot open {} for reading: {source}", path.display())]
    Input {
        /// Path of the input document.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An output file or directory could not be created or written.
    #[error("cannot open {} for writing: {source}", path.display())]
    Output {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The input is not recognized as an SVG document.
    #[error("unknown file format: not an SVG document")]
    UnknownFormat,

    /// The rasterizer rejected the markup.
    #[error("SVG parsing failure: {0}")]
    SvgParse(String),

    /// The rasterizer failed to allocate or paint a drawing surface.
    #[error("rendering failure: {0}")]
    Render(String),

    /// A named object produced no visible difference from the background.
    #[error("object {0:?} is not visible")]
    ObjectNotVisible(String),

    /// The canvas dimensions are not exact multiples of the downsample ratio.
    #[error("canvas {width}x{height} is not divisible by ratio {ratio}")]
    RatioMismatch {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
        /// Downsample ratio.
        ratio: u32,
    },

    /// Two raster buffers that must match in shape do not.
    #[error("raster size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    SizeMismatch {
        /// Expected width.
        expected_width: u32,
        /// Expected height.
        expected_height: u32,
        /// Actual width.
        actual_width: u32,
        /// Actual height.
        actual_height: u32,
    },

    /// A raster buffer is malformed (wrong data length, zero dimension, ...).
    #[error("invalid raster buffer: {0}")]
    InvalidBuffer(String),

    /// Image encoding failed.
    #[error("encoding error: {0}")]
    Encode(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
