//! Count tree built from a segmented document, with text and JSON rendering.
//!
//! Every region contributes its exclusive count exactly once: a section's figure excludes its
//! subsections, and the total is the sum over all regions.

use crate::reduce::Reducer;
use crate::section::{Region, RegionKind};
use serde::Serialize;

/// Commands whose presence marks a document as LaTeX rather than plain text.
const LATEX_MARKERS: &[&str] = &[r"\section", r"\subsection", r"\documentclass"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Word count of one section or subsection.
pub struct CountNode {
    /// Display number, `2` or `2.1`.
    pub number: String,
    /// Title from the structural marker.
    pub title: String,
    /// Exclusive word count.
    pub words: usize,
    /// Subsection counts, empty for subsections themselves.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<CountNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Word counts for a whole document.
pub struct Report {
    /// Sum of every region's exclusive count.
    pub total: usize,
    /// Count of the text before the first section.
    pub preamble: usize,
    /// Per-section counts in document order.
    pub sections: Vec<CountNode>,
    /// Whether the input looked like LaTeX; plain text only reports the total.
    #[serde(skip)]
    pub latex: bool,
}

#[derive(Clone, Copy, Debug)]
/// Controls how much of the tree is printed.
pub struct RenderOptions {
    /// 0 prints the total only, 1 adds sections, 2 adds subsections.
    pub depth: usize,
    /// List the preamble and subsections even when they have no words.
    pub show_empty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            show_empty: false,
        }
    }
}

impl Report {
    #[must_use]
    /// Counts every region of `root`, which should come from [`crate::segment()`].
    pub fn tally(root: &Region, reducer: &Reducer) -> Self {
        let count = |region: &Region| reducer.count_words(&region.raw_text);

        let sections: Vec<CountNode> = root
            .children
            .iter()
            .filter(|section| section.kind == RegionKind::Section)
            .map(|section| CountNode {
                number: section.number(Some(root)),
                title: section.title.clone(),
                words: count(section),
                subsections: section
                    .children
                    .iter()
                    .map(|sub| CountNode {
                        number: sub.number(Some(section)),
                        title: sub.title.clone(),
                        words: count(sub),
                        subsections: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        let preamble = count(root);
        let total = preamble
            + sections
                .iter()
                .map(|s| s.words + s.subsections.iter().map(|sub| sub.words).sum::<usize>())
                .sum::<usize>();
        let latex = !root.children.is_empty()
            || LATEX_MARKERS.iter().any(|m| root.raw_text.contains(m));

        Self {
            total,
            preamble,
            sections,
            latex,
        }
    }

    #[must_use]
    /// Renders the indented text report.
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = format!("Total Word Count: {}\n", self.total);
        if !self.latex || options.depth == 0 {
            return out;
        }

        let mut body = String::new();
        if self.preamble > 0 || options.show_empty {
            body.push_str(&format!("- Preamble/Abstract: {} words\n", self.preamble));
        }
        for section in &self.sections {
            body.push_str(&format!(
                "- Section {}: {} ({} words)\n",
                section.number, section.title, section.words
            ));
            if options.depth < 2 {
                continue;
            }
            for sub in &section.subsections {
                if sub.words > 0 || options.show_empty {
                    body.push_str(&format!(
                        "  - Subsection {}: {} ({} words)\n",
                        sub.number, sub.title, sub.words
                    ));
                }
            }
        }

        if !body.is_empty() {
            out.push('\n');
            out.push_str(&body);
        }
        out
    }

    /// Pretty-printed JSON form of the report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
