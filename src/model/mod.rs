//! Data model shared by the scanner, renderer and pipeline.

mod object;
mod placement;
mod raster;

pub use object::{BoundingBox, ObjectEntry};
pub use placement::Placement;
pub use raster::{PixelFormat, RasterBuffer};
