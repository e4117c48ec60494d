//! Region representation for segmented LaTeX documents.
//!
//! A region is a labelled, contiguous span of a document: the leading preamble, a top-level
//! section, or a subsection nested under a section. Regions own their exclusive text only, so
//! walking the tree in order and joining each marker with its text gives back the source.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Structural level of a region.
pub enum RegionKind {
    /// Everything before the first `\section{...}` marker.
    Preamble,
    /// A `\section{...}` region.
    Section,
    /// A `\subsection{...}` region under a section.
    Subsection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Hierarchical division of a document with its exclusive raw text.
pub struct Region {
    /// Structural level.
    pub kind: RegionKind,
    /// Title text inside the marker braces, empty for the preamble.
    pub title: String,
    /// 1-based position among siblings of the same kind (0 for the preamble).
    pub index: usize,
    /// Exact marker text that opened this region, empty for the preamble.
    pub marker: String,
    /// Text after the marker up to the next marker, excluding child regions.
    pub raw_text: String,
    /// Byte offset in the document where `raw_text` begins.
    pub byte_start: usize,
    /// Byte offset in the document where `raw_text` ends.
    pub byte_end: usize,
    /// 1-based line of the marker (1 for the preamble).
    pub line: usize,
    /// Nested regions: sections under the preamble, subsections under a section.
    pub children: Vec<Region>,
}

impl Region {
    #[must_use]
    /// Creates the root region covering an empty document.
    pub fn preamble() -> Self {
        Self {
            kind: RegionKind::Preamble,
            title: String::new(),
            index: 0,
            marker: String::new(),
            raw_text: String::new(),
            byte_start: 0,
            byte_end: 0,
            line: 1,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// All regions in document order, starting with `self`.
    pub fn regions(&self) -> Vec<&Region> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.regions());
        }
        out
    }

    #[must_use]
    /// Rebuilds the text this region and its descendants were cut from.
    pub fn to_source(&self) -> String {
        self.regions()
            .into_iter()
            .fold(String::new(), |mut acc, region| {
                acc.push_str(&region.marker);
                acc.push_str(&region.raw_text);
                acc
            })
    }

    #[must_use]
    /// Display number such as `2` or `2.1`, qualified by the parent section if any.
    pub fn number(&self, parent: Option<&Region>) -> String {
        match (self.kind, parent) {
            (RegionKind::Preamble, _) => String::new(),
            (RegionKind::Subsection, Some(p)) if p.kind == RegionKind::Section => {
                format!("{}.{}", p.index, self.index)
            }
            _ => self.index.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
