//! Outline cleanup: duplicate removal and level monotonicity.

use std::collections::HashSet;

use crate::model::{Heading, HeadingLevel};

/// Remove duplicates, then fix level jumps.
pub fn clean_headings(headings: Vec<Heading>) -> Vec<Heading> {
    let mut headings = dedupe_headings(headings);
    enforce_monotonic_levels(&mut headings);
    headings
}

/// Keep the first heading for each (lower-cased trimmed text, page) pair.
pub fn dedupe_headings(headings: Vec<Heading>) -> Vec<Heading> {
    let mut seen = HashSet::new();
    headings
        .into_iter()
        .filter(|h| seen.insert((h.text.trim().to_lowercase(), h.page)))
        .collect()
}

/// A heading may be at most one level deeper than the heading before it.
///
/// The comparison uses the predecessor's level after its own rewrite, so a
/// run like H1, H3, H3 becomes H1, H2, H3.
pub fn enforce_monotonic_levels(headings: &mut [Heading]) {
    let mut prev: Option<HeadingLevel> = None;
    for heading in headings.iter_mut() {
        if let Some(prev) = prev {
            if heading.level.depth() > prev.depth() + 1 {
                heading.level = prev.deeper();
            }
        }
        prev = Some(heading.level);
    }
}
