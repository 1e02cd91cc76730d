//! Heading inference stages.
//!
//! Font statistics are computed once per document; every page then goes
//! through line extraction, heading classification and level assignment.
//! The accumulated headings are normalized by the cleaner.

mod classify;
mod cleanup;
mod fonts;
mod level;
mod lines;

pub use classify::{HeadingClassifier, HeadingSignal};
pub use cleanup::{clean_headings, dedupe_headings, enforce_monotonic_levels};
pub use fonts::FontAnalyzer;
pub use level::LevelAssigner;
pub use lines::LineExtractor;
