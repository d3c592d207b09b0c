//! SVG format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// SVG format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFormat {
    /// Whether the document starts with an XML declaration (`<?xml ...?>`)
    pub xml_declaration: bool,
}

impl std::fmt::Display for SvgFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SVG")
    }
}

/// How many leading bytes to inspect when probing a file.
const PROBE_LEN: usize = 4096;

/// Detect SVG format from a file path.
///
/// Only the leading bytes of the file are inspected.
///
/// # Returns
/// * `Ok(SvgFormat)` if the file starts with an SVG root element
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SvgFormat> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let mut header = vec![0u8; PROBE_LEN];
    let n = file.read(&mut header)?;
    header.truncate(n);
    detect_format_from_bytes(&header)
}

/// Detect SVG format from bytes.
///
/// Skips an optional UTF-8 BOM, the XML declaration, comments, processing
/// instructions and a doctype; the first element found must be `svg`
/// (optionally namespace-prefixed).
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SvgFormat> {
    let mut rest = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let mut xml_declaration = false;

    loop {
        rest = skip_whitespace(rest);
        if !rest.starts_with(b"<") {
            return Err(Error::UnknownFormat);
        }

        if rest.starts_with(b"<?") {
            if element_name(&rest[2..]) == b"xml" {
                xml_declaration = true;
            }
            rest = skip_past(rest, b"?>").ok_or(Error::UnknownFormat)?;
        } else if rest.starts_with(b"<!--") {
            rest = skip_past(rest, b"-->").ok_or(Error::UnknownFormat)?;
        } else if rest.starts_with(b"<!") {
            // Doctype; internal subsets are not handled, plain ones are.
            rest = skip_past(rest, b">").ok_or(Error::UnknownFormat)?;
        } else {
            let name = element_name(&rest[1..]);
            let local = name.rsplit(|&b| b == b':').next().unwrap_or(name);
            if local == b"svg" {
                return Ok(SvgFormat { xml_declaration });
            }
            return Err(Error::UnknownFormat);
        }
    }
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let n = data
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    &data[n..]
}

fn skip_past<'a>(data: &'a [u8], marker: &[u8]) -> Option<&'a [u8]> {
    data.windows(marker.len())
        .position(|w| w == marker)
        .map(|pos| &data[pos + marker.len()..])
}

fn element_name(data: &[u8]) -> &[u8] {
    let n = data
        .iter()
        .take_while(|&&b| !b.is_ascii_whitespace() && b != b'/' && b != b'>')
        .count();
    &data[..n]
}

/// Check if a file is an SVG document.
pub fn is_svg<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent an SVG document.
pub fn is_svg_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
