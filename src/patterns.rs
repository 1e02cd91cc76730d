//! Pattern library: heading cues, footer/header noise and level overrides.
//!
//! The tables are plain data. Matching is first-match or any-match over the
//! compiled list; every pattern is anchored at the start of the line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::model::HeadingLevel;

/// Lexical and structural heading cues: `(pattern, purpose)`.
pub const HEADING_CUES: &[(&str, &str)] = &[
    (
        r"(?i)^(?:Chapter|Section|Part|Abstract|Introduction|Conclusion|Results|Discussion|Methods|Background|Summary|Appendix)\s*\d*",
        "keyword prefix",
    ),
    (r"(?i)^\d+\.?\s+[A-Z]", "single-level numbering"),
    (r"(?i)^\d+\.\d+\.?\s*[A-Z]", "two-level numbering"),
    (r"(?i)^\d+\.\d+\.\d+\.?\s*[A-Z]", "three-level numbering"),
    (r"(?i)^[IVX]+\.\s*[A-Z]", "roman numeral"),
    (r"(?i)^[A-Z]\.\s*[A-Z]", "lettered"),
    (r"^第\d+章", "CJK chapter"),
    (r"^第\d+節", "CJK section"),
    (r"^\d+章", "CJK chapter (short)"),
    (r"^\d+節", "CJK section (short)"),
    (r"(?i)^[A-Z][A-Z\s]{3,}$", "letters only"),
];

/// Footer/header boilerplate: `(pattern, purpose)`.
pub const NOISE_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)^Page \d+ of \d+", "page number"),
    (r"(?i)^\d{1,2} \w+ \d{4}$", "date (D Month YYYY)"),
    (r"(?i)^\w+ \d{1,2}, \d{4}$", "date (Month D, YYYY)"),
    (r"(?i)^\d{1,2}/\d{1,2}/\d{4}$", "date (DD/MM/YYYY)"),
    (r"(?i)^International$", "boilerplate keyword"),
    (r"(?i)^Software Testing$", "boilerplate keyword"),
    (r"(?i)^\[\w+-Web\]$", "running header"),
];

/// Structural level overrides, checked in order; the first match wins.
pub const LEVEL_OVERRIDES: &[(&str, HeadingLevel)] = &[
    (r"^(?:Chapter|CHAPTER|第\d+章)", HeadingLevel::H1),
    (r"^(?:Section|SECTION|第\d+節)", HeadingLevel::H2),
    (r"^\d+\.\d+\.\d+", HeadingLevel::H3),
    (r"^\d+\.\d+", HeadingLevel::H2),
    (r"^\d+\.", HeadingLevel::H1),
];

static STANDARD: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::compile().expect("built-in patterns are valid")
});

/// A compiled pattern with its purpose.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub purpose: String,
}

/// Compiled heading cue, noise and level override patterns.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    heading_cues: Vec<Pattern>,
    noise: Vec<Pattern>,
    level_overrides: Vec<(Regex, HeadingLevel)>,
}

impl PatternLibrary {
    /// The built-in library.
    pub fn standard() -> &'static PatternLibrary {
        &STANDARD
    }

    /// The built-in library plus extra noise patterns.
    pub fn with_extra_noise(extra: &[String]) -> Result<Self> {
        if extra.is_empty() {
            return Ok(Self::standard().clone());
        }
        let mut library = Self::standard().clone();
        for pattern in extra {
            library.noise.push(Pattern {
                regex: Regex::new(pattern)?,
                purpose: "custom".to_string(),
            });
        }
        Ok(library)
    }

    fn compile() -> Result<Self> {
        let heading_cues = compile_table(HEADING_CUES)?;
        let noise = compile_table(NOISE_PATTERNS)?;
        let level_overrides = LEVEL_OVERRIDES
            .iter()
            .map(|(p, level)| Ok((Regex::new(p)?, *level)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            heading_cues,
            noise,
            level_overrides,
        })
    }

    /// Whether the text carries a heading cue.
    pub fn is_heading_cue(&self, text: &str) -> bool {
        self.heading_cue(text).is_some()
    }

    /// The first heading cue that matches.
    pub fn heading_cue(&self, text: &str) -> Option<&Pattern> {
        self.heading_cues.iter().find(|p| p.regex.is_match(text))
    }

    /// Whether the text is footer/header noise.
    pub fn is_noise(&self, text: &str) -> bool {
        self.noise.iter().any(|p| p.regex.is_match(text))
    }

    /// The structural level override for the text, if any.
    pub fn level_override(&self, text: &str) -> Option<HeadingLevel> {
        self.level_overrides
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, level)| *level)
    }

    /// Number of noise patterns.
    pub fn noise_count(&self) -> usize {
        self.noise.len()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn compile_table(table: &[(&str, &str)]) -> Result<Vec<Pattern>> {
    table
        .iter()
        .map(|(pattern, purpose)| {
            Ok(Pattern {
                regex: Regex::new(pattern)?,
                purpose: (*purpose).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_patterns() {
        let lib = PatternLibrary::standard();
        assert!(lib.is_noise("Page 3 of 10"));
        assert!(lib.is_noise("page 12 of 40 - draft"));
        assert!(lib.is_noise("31 May 2014"));
        assert!(lib.is_noise("May 31, 2014"));
        assert!(lib.is_noise("03/12/2021"));
        assert!(lib.is_noise("International"));
        assert!(lib.is_noise("[Agile-Web]"));
        assert!(!lib.is_noise("1. Introduction"));
        assert!(!lib.is_noise("International Standards Overview"));
    }

    #[test]
    fn test_heading_cues() {
        let lib = PatternLibrary::standard();
        assert!(lib.is_heading_cue("Chapter 3"));
        assert!(lib.is_heading_cue("appendix A: Glossary"));
        assert!(lib.is_heading_cue("2 Background"));
        assert!(lib.is_heading_cue("2.1 Scope"));
        assert!(lib.is_heading_cue("2.1.4 Limits"));
        assert!(lib.is_heading_cue("IV. Results"));
        assert!(lib.is_heading_cue("B. Methods"));
        assert!(lib.is_heading_cue("第2章 概要"));
        assert!(lib.is_heading_cue("3節"));
        assert!(lib.is_heading_cue("TABLE OF CONTENTS"));
        assert!(!lib.is_heading_cue("the results were inconclusive"));
        assert!(!lib.is_heading_cue("2024"));
    }

    #[test]
    fn test_letters_only_cue_ignores_case() {
        let lib = PatternLibrary::standard();
        let cue = lib.heading_cue("OVERVIEW").unwrap();
        assert_eq!(cue.purpose, "letters only");
        let cue = lib.heading_cue("overview of things").unwrap();
        assert_eq!(cue.purpose, "letters only");
        assert!(!lib.is_heading_cue("overview of things."));
        assert!(!lib.is_heading_cue("abc"));
    }

    #[test]
    fn test_level_override_order() {
        let lib = PatternLibrary::standard();
        assert_eq!(lib.level_override("Chapter 1"), Some(HeadingLevel::H1));
        assert_eq!(lib.level_override("CHAPTER ONE"), Some(HeadingLevel::H1));
        assert_eq!(lib.level_override("第1章"), Some(HeadingLevel::H1));
        assert_eq!(lib.level_override("Section 4"), Some(HeadingLevel::H2));
        assert_eq!(lib.level_override("第2節"), Some(HeadingLevel::H2));
        assert_eq!(lib.level_override("1.2.3 Detail"), Some(HeadingLevel::H3));
        assert_eq!(lib.level_override("1.2 Overview"), Some(HeadingLevel::H2));
        assert_eq!(lib.level_override("1. Introduction"), Some(HeadingLevel::H1));
        assert_eq!(lib.level_override("1 Introduction"), None);
        assert_eq!(lib.level_override("chapter 1"), None);
    }

    #[test]
    fn test_extra_noise() {
        let lib = PatternLibrary::with_extra_noise(&["(?i)^confidential$".to_string()]).unwrap();
        assert_eq!(lib.noise_count(), NOISE_PATTERNS.len() + 1);
        assert!(lib.is_noise("CONFIDENTIAL"));

        let err = PatternLibrary::with_extra_noise(&["(".to_string()]);
        assert!(err.is_err());
    }
}
