//! Single-pass scanner locating titled element subtrees.
//!
//! The scanner walks the raw markup bytes once, left to right, maintaining
//! two parallel stacks of tag-open offsets instead of materializing a tree.
//! An element owns a title when a `</title>` closes directly inside it; the
//! element's own closing tag then finalizes the entry. This deliberately
//! avoids a general XML parser: the documents are machine-exported and the
//! only structure of interest is "which byte range belongs to which titled
//! group".

use crate::model::ObjectEntry;

/// Scan markup for titled subtrees.
///
/// Returns one [`ObjectEntry`] per element that has a `<title>` child, in
/// the order the owning subtrees *close* (document order of closure). Names
/// are not deduplicated here.
///
/// Tie-break: the last title seen before its depth closes wins, so a title
/// appearing after other children still names its parent, and of two
/// sibling titles the later one survives.
///
/// Truncated markup ends the scan silently; anything still open is
/// discarded. Stray closing tags with no matching opener are ignored.
pub fn scan_titles(svg: &[u8]) -> Vec<ObjectEntry> {
    let mut objects = Vec::new();
    let mut start_stack: Vec<usize> = Vec::new();
    let mut end_stack: Vec<usize> = Vec::new();
    let mut pending_depth: Option<usize> = None;
    let mut title = String::new();

    let len = svg.len();
    let mut pos = 0;

    while pos < len {
        while pos < len && svg[pos] != b'<' {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        let tag_start = pos;
        pos += 1;
        if pos >= len {
            break;
        }

        let mut opening = true;
        let mut closing = false;
        if svg[pos] == b'/' {
            opening = false;
            closing = true;
            pos += 1;
            if pos >= len {
                break;
            }
        }
        while pos < len && svg[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let name_start = pos;
        while pos < len
            && !svg[pos].is_ascii_whitespace()
            && svg[pos] != b'/'
            && svg[pos] != b'>'
        {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        let name = &svg[name_start..pos];

        let attr_start = pos;
        while pos < len && svg[pos] != b'>' {
            pos += 1;
        }
        if pos >= len {
            break;
        }
        let tag_end = pos + 1;

        // Back-scan from the '>' over trailing whitespace; a '/' there marks
        // a self-closing tag.
        let mut xpos = pos;
        while xpos > attr_start {
            xpos -= 1;
            if svg[xpos] == b'/' {
                closing = true;
                break;
            }
            if !svg[xpos].is_ascii_whitespace() {
                break;
            }
        }
        pos += 1;

        // Declaration and comment pseudo-tags have no stack effect.
        if name == b"?xml" || name == b"!--" {
            continue;
        }

        if opening && !closing {
            start_stack.push(tag_start);
            end_stack.push(tag_end);
        } else if closing && !opening {
            if name == b"title" {
                if let Some(&open_end) = end_stack.last() {
                    title = String::from_utf8_lossy(&svg[open_end..tag_start]).into_owned();
                    pending_depth = Some(start_stack.len() - 1);
                }
            }
            if pending_depth == Some(start_stack.len()) {
                if let Some(&span_start) = start_stack.last() {
                    objects.push(ObjectEntry::new(title.clone(), span_start..tag_end));
                }
                pending_depth = None;
            }
            start_stack.pop();
            end_stack.pop();
        }
        // Self-closing tags balance a push with an immediate pop.
    }

    objects
}
