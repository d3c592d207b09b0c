//! # svgslice
//!
//! Slice one SVG document with titled groups into raster layers for an
//! overlay-rendering system: a background PNG with every titled group
//! stripped, plus one tightly cropped, alpha-masked sprite per uniquely
//! named group holding only the pixels that group contributes over the
//! background, and a layout descriptor placing each sprite on the canvas.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> svgslice::Result<()> {
//!     // Slice a document into ./panel/ at the document's own size.
//!     let result = svgslice::slice_file("panel.svg", "panel")?;
//!
//!     for placement in &result.placements {
//!         println!("{} at ({}, {})", placement.name, placement.x, placement.y);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Hand-rolled title scan**: one linear pass over the markup bytes, no
//!   DOM, locating every element with a `<title>` child
//! - **Pixel-comparable layers**: each layer renders on a freshly cleared
//!   surface and through the same box downsampler as the background
//! - **Tight sprites**: per-object diffs cropped to the changed bounding
//!   box, unchanged pixels fully transparent
//! - **Self-contained PNG writer**: chunked encoder over a plain deflate
//!   primitive, losslessly round-trippable by any standard decoder

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod png;
pub mod render;
pub mod scanner;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_svg, SvgFormat};
pub use error::{Error, Result};
pub use layout::Layout;
pub use model::{BoundingBox, ObjectEntry, PixelFormat, Placement, RasterBuffer};
pub use pipeline::{Pipeline, Progress, SliceOptions, SliceResult};
pub use scanner::scan_titles;

use std::path::Path;

/// Scan a document for titled subtrees without rendering anything.
///
/// # Example
///
/// ```no_run
/// let objects = svgslice::scan_file("panel.svg").unwrap();
/// for obj in &objects {
///     println!("{} spans {} bytes", obj.name, obj.span_len());
/// }
/// ```
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<Vec<ObjectEntry>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    scan_bytes(&data)
}

/// Scan in-memory document bytes for titled subtrees.
///
/// The data is validated as SVG first; use [`scan_titles`] directly to
/// skip validation.
pub fn scan_bytes(data: &[u8]) -> Result<Vec<ObjectEntry>> {
    detect::detect_format_from_bytes(data)?;
    Ok(scan_titles(data))
}

/// Slice a document into `out_dir` with default options.
///
/// # Example
///
/// ```no_run
/// let result = svgslice::slice_file("panel.svg", "panel").unwrap();
/// println!("{} layers", result.placements.len());
/// ```
pub fn slice_file<P, Q>(input: P, out_dir: Q) -> Result<SliceResult>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    slice_file_with_options(input, out_dir, SliceOptions::default())
}

/// Slice a document into `out_dir` with custom options.
///
/// # Example
///
/// ```no_run
/// use svgslice::SliceOptions;
///
/// let options = SliceOptions::new().with_ratio(12).with_manifest(true);
/// let result = svgslice::slice_file_with_options("panel.svg", "panel", options).unwrap();
/// assert!(result.manifest_file.is_some());
/// ```
pub fn slice_file_with_options<P, Q>(
    input: P,
    out_dir: Q,
    options: SliceOptions,
) -> Result<SliceResult>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Pipeline::from_file(input, options)?.run(out_dir)
}

/// Slice in-memory document bytes into `out_dir`.
pub fn slice_bytes<P: AsRef<Path>>(
    data: Vec<u8>,
    out_dir: P,
    options: SliceOptions,
) -> Result<SliceResult> {
    Pipeline::new(data, options)?.run(out_dir)
}
