//! Layout descriptor emission.
//!
//! The overlay renderer consuming the sliced layers expects one view file
//! describing where each layer sits on the downsampled canvas: a
//! full-canvas background placement plus one placement per object. The
//! same records can also be written as a JSON manifest.

use crate::error::{Error, Result};
use crate::model::Placement;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A complete layout: canvas geometry plus the placements in discovery
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    /// Canvas width in downsampled pixels.
    pub width: u32,

    /// Canvas height in downsampled pixels.
    pub height: u32,

    /// Element name of the background layer (also its file stem).
    pub background: String,

    /// Name of the emitted view.
    pub view: String,

    /// Per-object placements, one per unique name.
    pub placements: Vec<Placement>,
}

impl Layout {
    /// Render the layout as a view XML document.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\"?>\n<mamelayout version=\"2\">\n");
        out.push_str(&format!(
            "<element name=\"{}\"><image file=\"{}.png\"/></element>\n",
            xml_escape(&self.background),
            xml_escape(&self.background)
        ));
        for p in &self.placements {
            out.push_str(&format!(
                "<element name=\"{}\" defstate=\"0\"><image file=\"{}.png\"/></element>\n",
                xml_escape(&p.name),
                xml_escape(&p.name)
            ));
        }

        out.push_str(&format!(
            "<view name=\"{}\">\n  <bounds x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"/>\n",
            xml_escape(&self.view),
            self.width,
            self.height
        ));
        out.push_str(&format!(
            "  <bezel element=\"{}\">\n    <bounds x=\"0\" y=\"0\" width=\"{}\" height=\"{}\"/>\n  </bezel>\n",
            xml_escape(&self.background),
            self.width,
            self.height
        ));
        for p in &self.placements {
            out.push_str(&format!(
                "  <bezel name=\"b-{name}\" element=\"{name}\"><bounds x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></bezel>\n",
                p.x,
                p.y,
                p.width,
                p.height,
                name = xml_escape(&p.name)
            ));
        }
        out.push_str("</view>\n</mamelayout>\n");
        out
    }

    /// Render the layout as a pretty-printed JSON manifest.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }

    /// Write the XML view file to `path`.
    pub fn write_xml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_text(path.as_ref(), &self.to_xml())
    }

    /// Write the JSON manifest to `path`.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_text(path.as_ref(), &self.to_json()?)
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// Escape the five XML-reserved characters for use in attribute values.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
