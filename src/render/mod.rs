//! Layer rendering: markup isolation, rasterization, downsampling, diffing.

mod diff;
mod downsample;
mod filter;
mod rasterize;

pub use diff::{diff_layers, LayerDiff};
pub use downsample::downsample;
pub use filter::isolate_markup;
pub use rasterize::{document_size, Rasterizer};
