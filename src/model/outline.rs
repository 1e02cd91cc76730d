//! Outline types: heading levels, headings and the final document outline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level in the inferred hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Depth of the level (H1 = 1).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level for a depth; depths past 3 clamp to H3, 0 maps to H1.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// The level one step deeper (H3 stays H3).
    pub fn deeper(self) -> Self {
        Self::from_depth(self.depth() + 1)
    }

    /// Label used in output ("H1", "H2", "H3").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Inferred document outline.
///
/// Field order is the serialized key order: `title`, then `outline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title
    pub title: String,
    /// Headings in document order
    pub outline: Vec<Heading>,
}

impl Outline {
    /// Create an outline, normalizing the title with [`Outline::finish_title`].
    pub fn new(title: &str, outline: Vec<Heading>) -> Self {
        Self {
            title: Self::finish_title(title),
            outline,
        }
    }

    /// Outline used when a document cannot be read: the title derived
    /// from the file name and no headings.
    pub fn fallback(name: &str) -> Self {
        Self::new(&title_from_filename(name), Vec::new())
    }

    /// Trim the title and append one trailing space when non-empty.
    ///
    /// Existing consumers of the JSON output expect the trailing space.
    pub fn finish_title(title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            String::new()
        } else {
            format!("{} ", title)
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

/// Derive a title from a file name: take the stem, turn underscores into
/// spaces and capitalize the first letter of every run of cased letters.
pub(crate) fn title_from_filename(name: &str) -> String {
    let stem = std::path::Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_depth_roundtrip() {
        for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
            assert_eq!(HeadingLevel::from_depth(level.depth()), level);
        }
        assert_eq!(HeadingLevel::H1.deeper(), HeadingLevel::H2);
        assert_eq!(HeadingLevel::H3.deeper(), HeadingLevel::H3);
    }

    #[test]
    fn test_finish_title() {
        assert_eq!(Outline::finish_title("  Spec v1 "), "Spec v1 ");
        assert_eq!(Outline::finish_title("   "), "");
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("annual_report_2024.pdf"), "Annual Report 2024");
        assert_eq!(title_from_filename("/tmp/in/RFP_final-DRAFT.pdf"), "Rfp Final-Draft");
        assert_eq!(title_from_filename("2nd_edition.pdf"), "2Nd Edition");
        assert_eq!(title_from_filename(""), "");
    }

    #[test]
    fn test_title_case_restarts_after_uncased_letter() {
        assert_eq!(title_from_filename("第a_report.pdf"), "第A Report");
        assert_eq!(title_from_filename("報告書_draft.pdf"), "報告書 Draft");
        assert_eq!(title_from_filename("ÉTUDE_finale.pdf"), "Étude Finale");
    }

    #[test]
    fn test_fallback_outline() {
        let outline = Outline::fallback("broken_file.pdf");
        assert_eq!(outline.title, "Broken File ");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_serialized_key_order() {
        let outline = Outline::new(
            "Doc",
            vec![Heading::new(HeadingLevel::H2, "1.1 Scope", 3)],
        );
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Doc ","outline":[{"level":"H2","text":"1.1 Scope","page":3}]}"#
        );
    }
}
