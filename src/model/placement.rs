//! Layout records consumed by the layout emitter.

use serde::{Deserialize, Serialize};

/// Placement of one layer in the downsampled canvas.
///
/// Produced by the pipeline in discovery order, one per unique object name,
/// and fed to the layout emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Object name (also the image file stem).
    pub name: String,

    /// Left edge of the layer in canvas coordinates.
    pub x: u32,

    /// Top edge of the layer in canvas coordinates.
    pub y: u32,

    /// Layer width in pixels.
    pub width: u32,

    /// Layer height in pixels.
    pub height: u32,
}

impl Placement {
    /// Image file name for this placement.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}
