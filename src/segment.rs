//! Linear marker scan that cuts a document into preamble, sections and subsections.
//!
//! Only the exact `\section{...}` and `\subsection{...}` forms are structural. Starred variants
//! and deeper levels stay in the prose and are dealt with by the reducer. The scan never fails:
//! unbalanced titles are cut at the next closing brace or line end, and subsections that appear
//! before any section are folded into the preamble.

use crate::reduce::{comment_start, is_escaped, Groups};
use crate::section::{Region, RegionKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(subsection|section)\{").expect("valid marker regex"));

/// A structural marker located in the source document.
struct Marker {
    kind: RegionKind,
    start: usize,
    end: usize,
    title: String,
    line: usize,
}

/// Splits `document` into a region tree rooted at the preamble.
///
/// The root's children are the sections in document order, and each section's children are its
/// subsections. Every byte of the input lands in exactly one marker or one `raw_text`.
#[must_use]
pub fn segment(document: &str) -> Region {
    let markers = find_markers(document);
    let markers = match markers.iter().position(|m| m.kind == RegionKind::Section) {
        Some(first) => &markers[first..],
        None => &[][..],
    };

    let mut root = Region::preamble();
    let preamble_end = markers.first().map_or(document.len(), |m| m.start);
    root.raw_text = document[..preamble_end].to_string();
    root.byte_end = preamble_end;

    for (i, marker) in markers.iter().enumerate() {
        let text_end = markers.get(i + 1).map_or(document.len(), |next| next.start);
        let mut region = Region {
            kind: marker.kind,
            title: marker.title.clone(),
            index: 0,
            marker: document[marker.start..marker.end].to_string(),
            raw_text: document[marker.end..text_end].to_string(),
            byte_start: marker.end,
            byte_end: text_end,
            line: marker.line,
            children: Vec::new(),
        };

        match marker.kind {
            RegionKind::Section => {
                region.index = root.children.len() + 1;
                root.children.push(region);
            }
            RegionKind::Subsection => {
                if let Some(section) = root.children.last_mut() {
                    region.index = section.children.len() + 1;
                    section.children.push(region);
                }
            }
            RegionKind::Preamble => {}
        }
    }

    debug!(
        sections = root.children.len(),
        markers = markers.len(),
        "segmented document"
    );
    root
}

fn find_markers(document: &str) -> Vec<Marker> {
    let mut markers = Vec::new();
    let groups = Groups::new(document);
    let mut cursor = 0;
    let mut line = 1;
    let mut counted = 0;

    for caps in RE_MARKER.captures_iter(document) {
        let Some(whole) = caps.get(0) else { continue };
        let start = whole.start();

        // Markers swallowed by a previous title, escaped as `\\section`, or commented out.
        if start < cursor || is_escaped(document, start) || in_comment(document, start) {
            continue;
        }

        let kind = if &caps[1] == "section" {
            RegionKind::Section
        } else {
            RegionKind::Subsection
        };
        let (title, end) = read_title(document, &groups, whole.end());
        line += document[counted..start].matches('\n').count();
        counted = start;
        debug!(?kind, %title, line, "found marker");

        markers.push(Marker {
            kind,
            start,
            end,
            title,
            line,
        });
        cursor = end;
    }

    markers
}

fn in_comment(document: &str, pos: usize) -> bool {
    let line_start = document[..pos].rfind('\n').map_or(0, |i| i + 1);
    comment_start(&document[line_start..pos]).is_some()
}

/// Reads a title whose opening brace ends just before `from`.
///
/// Returns the trimmed title and the byte offset just past the marker.
fn read_title(document: &str, groups: &Groups, from: usize) -> (String, usize) {
    if let Some(close) = groups.close_of(from - 1, document.len()) {
        return (document[from..close].trim().to_string(), close + 1);
    }

    let rest = &document[from..];
    // Unbalanced: settle for the next closing brace or the end of the line.
    match rest.find(['}', '\n']) {
        Some(i) if rest.as_bytes()[i] == b'}' => (rest[..i].trim().to_string(), from + i + 1),
        Some(i) => (rest[..i].trim().to_string(), from + i),
        None => (rest.trim().to_string(), document.len()),
    }
}

#[cfg(test)]
#[path = "tests/segment.rs"]
mod tests;
