//! SVG rasterization via resvg onto a reused drawing surface.

use crate::error::{Error, Result};
use crate::model::{PixelFormat, RasterBuffer};
use resvg::usvg;
use tiny_skia::{Color, Pixmap, Transform};

/// Rasterizes markup onto a fixed-size surface.
///
/// The surface is allocated once and reused for every layer; it is cleared
/// to transparent before each render so no pixels bleed between layers.
/// The document is scaled to fill the surface exactly, which is the
/// identity when the canvas matches the document's intrinsic size.
pub struct Rasterizer {
    width: u32,
    height: u32,
    pixmap: Pixmap,
}

impl Rasterizer {
    /// Allocate a rasterizer for the given canvas size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::Render(format!(
                "cannot allocate a {}x{} drawing surface",
                width, height
            ))
        })?;
        Ok(Self {
            width,
            height,
            pixmap,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render markup and return the surface as a premultiplied RGBA buffer.
    ///
    /// Parse failures reported by the rasterizer are fatal for the run.
    pub fn render(&mut self, svg: &[u8]) -> Result<RasterBuffer> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(svg, &options)
            .map_err(|e| Error::SvgParse(e.to_string()))?;

        self.pixmap.fill(Color::TRANSPARENT);

        let size = tree.size();
        let transform = Transform::from_scale(
            self.width as f32 / size.width(),
            self.height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut self.pixmap.as_mut());

        RasterBuffer::from_raw(
            self.width,
            self.height,
            PixelFormat::Rgba,
            self.pixmap.data().to_vec(),
        )
    }
}

/// Probe the document's intrinsic pixel size without rendering it.
pub fn document_size(svg: &[u8]) -> Result<(u32, u32)> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg, &options)
        .map_err(|e| Error::SvgParse(e.to_string()))?;
    let size = tree.size();
    Ok((
        size.width().round() as u32,
        size.height().round() as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"8\" height=\"8\">\
        <rect x=\"2\" y=\"2\" width=\"4\" height=\"4\" fill=\"#ff0000\"/>\
        </svg>";

    #[test]
    fn test_document_size() {
        let (w, h) = document_size(RED_SQUARE).unwrap();
        assert_eq!((w, h), (8, 8));
    }

    #[test]
    fn test_render_produces_rgba_canvas() {
        let mut rasterizer = Rasterizer::new(8, 8).unwrap();
        let buffer = rasterizer.render(RED_SQUARE).unwrap();
        assert_eq!(buffer.width(), 8);
        assert_eq!(buffer.height(), 8);
        assert_eq!(buffer.format(), PixelFormat::Rgba);

        // Inside the rectangle: opaque red. Outside: cleared transparent.
        assert_eq!(buffer.pixel(4, 4), &[255, 0, 0, 255]);
        assert_eq!(buffer.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_surface_is_cleared_between_renders() {
        let mut rasterizer = Rasterizer::new(8, 8).unwrap();
        rasterizer.render(RED_SQUARE).unwrap();

        let empty: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"8\" height=\"8\"/>";
        let buffer = rasterizer.render(empty).unwrap();
        assert_eq!(buffer.pixel(4, 4), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let mut rasterizer = Rasterizer::new(8, 8).unwrap();
        let result = rasterizer.render(b"<svg><unclosed");
        assert!(matches!(result, Err(Error::SvgParse(_))));
    }

    #[test]
    fn test_render_scales_to_canvas() {
        // Same document rendered at twice the intrinsic size.
        let mut rasterizer = Rasterizer::new(16, 16).unwrap();
        let buffer = rasterizer.render(RED_SQUARE).unwrap();
        assert_eq!(buffer.pixel(8, 8), &[255, 0, 0, 255]);
        assert_eq!(buffer.pixel(1, 1), &[0, 0, 0, 0]);
    }
}
