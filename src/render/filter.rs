//! Markup isolation for a single layer.

use crate::model::ObjectEntry;
use std::ops::Range;

/// Build the markup for one layer.
///
/// Subtrees titled `target` stay in place; the span of every other titled
/// subtree is removed. The empty target therefore strips all titled
/// subtrees, which is the background pass.
///
/// Removed spans are merged before cutting, so overlapping or nested spans
/// come out as one balanced cut. A kept subtree nested inside a removed one
/// disappears with its ancestor.
pub fn isolate_markup(svg: &[u8], objects: &[ObjectEntry], target: &str) -> Vec<u8> {
    let mut cuts: Vec<Range<usize>> = objects
        .iter()
        .filter(|entry| entry.name != target)
        .map(|entry| entry.span.clone())
        .collect();
    cuts.sort_by_key(|span| span.start);

    let mut out = Vec::with_capacity(svg.len());
    let mut pos = 0;
    for cut in cuts {
        if cut.start > pos {
            out.extend_from_slice(&svg[pos..cut.start]);
        }
        pos = pos.max(cut.end);
    }
    out.extend_from_slice(&svg[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_titles;

    const DOC: &[u8] = b"<svg>\
        <rect id=\"backdrop\"/>\
        <g id=\"ga\"><title>a</title><rect id=\"ra\"/></g>\
        <g id=\"gb\"><title>b</title><rect id=\"rb\"/></g>\
        </svg>";

    #[test]
    fn test_background_strips_all_titled_subtrees() {
        let objects = scan_titles(DOC);
        let filtered = isolate_markup(DOC, &objects, "");
        let text = String::from_utf8(filtered).unwrap();
        assert!(text.contains("backdrop"));
        assert!(!text.contains("ga"));
        assert!(!text.contains("gb"));
        assert!(text.ends_with("</svg>"));
    }

    #[test]
    fn test_target_subtree_is_kept() {
        let objects = scan_titles(DOC);
        let filtered = isolate_markup(DOC, &objects, "a");
        let text = String::from_utf8(filtered).unwrap();
        assert!(text.contains("backdrop"));
        assert!(text.contains("id=\"ra\""));
        assert!(!text.contains("id=\"rb\""));
    }

    #[test]
    fn test_all_same_named_subtrees_are_kept() {
        let doc = b"<svg>\
            <g id=\"g1\"><title>dup</title><rect id=\"r1\"/></g>\
            <g id=\"g2\"><title>dup</title><rect id=\"r2\"/></g>\
            <g id=\"g3\"><title>other</title><rect id=\"r3\"/></g>\
            </svg>";
        let objects = scan_titles(doc);
        let filtered = isolate_markup(doc, &objects, "dup");
        let text = String::from_utf8(filtered).unwrap();
        assert!(text.contains("id=\"r1\""));
        assert!(text.contains("id=\"r2\""));
        assert!(!text.contains("id=\"r3\""));
    }

    #[test]
    fn test_untitled_markup_is_untouched() {
        let objects = scan_titles(DOC);
        let filtered = isolate_markup(DOC, &objects, "nonexistent");
        let text = String::from_utf8(filtered).unwrap();
        assert!(text.starts_with("<svg>"));
        assert!(text.contains("backdrop"));
        assert!(!text.contains("id=\"ra\""));
    }

    #[test]
    fn test_no_objects_is_identity() {
        let filtered = isolate_markup(DOC, &[], "");
        assert_eq!(filtered, DOC);
    }

    #[test]
    fn test_nested_spans_cut_as_one() {
        // Synthetic nested entries, inner listed first as the scanner would
        // report them: the merged cut removes the whole outer range once,
        // leaving balanced markup.
        let doc: &[u8] = b"<svg><g id=\"o\"><g id=\"i\"><rect/></g></g><circle/></svg>";
        let text = std::str::from_utf8(doc).unwrap();
        let outer_span = text.find("<g id=\"o\"").unwrap()..text.rfind("</g>").unwrap() + 4;
        let inner_span = text.find("<g id=\"i\"").unwrap()..text.find("</g>").unwrap() + 4;
        let objects = vec![
            ObjectEntry::new("in", inner_span),
            ObjectEntry::new("out", outer_span),
        ];

        let filtered = isolate_markup(doc, &objects, "");
        assert_eq!(filtered, b"<svg><circle/></svg>");

        // Keeping the inner name still loses it: the enclosing subtree is
        // stripped as a whole.
        let filtered = isolate_markup(doc, &objects, "in");
        assert_eq!(filtered, b"<svg><circle/></svg>");

        // Keeping the outer name removes only the inner subtree out of it.
        let filtered = isolate_markup(doc, &objects, "out");
        let kept = String::from_utf8(filtered).unwrap();
        assert!(kept.contains("id=\"o\""));
        assert!(!kept.contains("id=\"i\""));
    }
}
