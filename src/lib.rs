//! texwords: hierarchical word counts for LaTeX documents.
//!
//! A document is first cut into a tree of regions (preamble, sections, subsections) by
//! [`segment()`], then each region's exclusive text is reduced to prose and counted with
//! [`count_words`] or a configured [`reduce::Reducer`]. Both steps are total: malformed
//! markup degrades to best-effort boundaries and counts instead of failing.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod input;
pub mod policy;
pub mod reduce;
pub mod report;
pub mod section;
pub mod segment;

pub use reduce::count_words;
pub use segment::segment;

#[cfg(test)]
#[path = "tests/properties.rs"]
mod properties;
