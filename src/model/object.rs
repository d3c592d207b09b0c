//! Titled subtree entries discovered by the scanner.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One titled subtree discovered in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Text content of the subtree's `<title>` element. The empty string is
    /// reserved for the background pass and never names an emitted layer.
    pub name: String,

    /// Half-open byte range of the whole subtree in the source document,
    /// from the first byte of the opening tag through the `>` of the
    /// closing tag.
    pub span: Range<usize>,

    /// Bounding box of the object's visible contribution in downsampled
    /// pixel coordinates. `None` until the diff step has run.
    pub bbox: Option<BoundingBox>,
}

impl ObjectEntry {
    /// Create a new entry with no bounding box.
    pub fn new(name: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            span,
            bbox: None,
        }
    }

    /// Length of the subtree's markup in bytes.
    pub fn span_len(&self) -> usize {
        self.span.end - self.span.start
    }
}

/// Inclusive axis-aligned bounding box in downsampled pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Leftmost differing column.
    pub x0: u32,
    /// Topmost differing row.
    pub y0: u32,
    /// Rightmost differing column (inclusive).
    pub x1: u32,
    /// Bottommost differing row (inclusive).
    pub y1: u32,
}

impl BoundingBox {
    /// Width of the box in pixels.
    pub fn width(&self) -> u32 {
        self.x1 - self.x0 + 1
    }

    /// Height of the box in pixels.
    pub fn height(&self) -> u32 {
        self.y1 - self.y0 + 1
    }
}
