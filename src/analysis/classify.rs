//! Heading classifier.

use crate::config::OutlineConfig;
use crate::model::{FontStats, Line};
use crate::patterns::PatternLibrary;

/// The signal that made a line a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSignal {
    /// Font size at or above the 90th percentile
    AboveQ90,
    /// Font size at or above the 75th percentile
    AboveQ75,
    /// Font size well above the document average
    AboveAverage,
    /// Bold and at least average size
    BoldAtAverage,
    /// Matches a heading cue pattern
    Cue,
    /// Short all upper-case line
    Uppercase,
}

/// Decides whether a line is a heading.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier<'a> {
    patterns: &'a PatternLibrary,
    config: &'a OutlineConfig,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier.
    pub fn new(patterns: &'a PatternLibrary, config: &'a OutlineConfig) -> Self {
        Self { patterns, config }
    }

    /// Whether the line is a heading.
    pub fn is_heading(&self, line: &Line, stats: &FontStats) -> bool {
        self.classify(line, stats).is_some()
    }

    /// The first signal accepting the line, or `None` when rejected.
    ///
    /// Lines outside the heading length bounds, and period-terminated lines
    /// long enough to be prose, are rejected before any signal is tried.
    pub fn classify(&self, line: &Line, stats: &FontStats) -> Option<HeadingSignal> {
        let config = self.config;
        let text = line.text.trim();
        let len = text.chars().count();

        if len < config.min_heading_chars || len > config.max_heading_chars {
            return None;
        }
        if text.ends_with('.') && len > config.prose_min_chars {
            return None;
        }

        let size = line.font_size;
        if size >= stats.q90 {
            Some(HeadingSignal::AboveQ90)
        } else if size >= stats.q75 {
            Some(HeadingSignal::AboveQ75)
        } else if size >= stats.avg * config.avg_ratio_threshold {
            Some(HeadingSignal::AboveAverage)
        } else if line.is_bold && size >= stats.avg {
            Some(HeadingSignal::BoldAtAverage)
        } else if self.patterns.is_heading_cue(text) {
            Some(HeadingSignal::Cue)
        } else if line.is_uppercase
            && (config.uppercase_min_chars..=config.uppercase_max_chars).contains(&len)
        {
            Some(HeadingSignal::Uppercase)
        } else {
            None
        }
    }
}
