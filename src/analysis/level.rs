//! Heading level assignment.

use crate::config::OutlineConfig;
use crate::model::{FontStats, HeadingLevel, Line};
use crate::patterns::PatternLibrary;

/// Assigns H1/H2/H3 to accepted headings.
#[derive(Debug, Clone, Copy)]
pub struct LevelAssigner<'a> {
    patterns: &'a PatternLibrary,
    h1_ratio: f32,
    h2_ratio: f32,
}

impl<'a> LevelAssigner<'a> {
    /// Create an assigner.
    pub fn new(patterns: &'a PatternLibrary, config: &OutlineConfig) -> Self {
        Self {
            patterns,
            h1_ratio: config.h1_ratio,
            h2_ratio: config.h2_ratio,
        }
    }

    /// Level from the ratio of the font size to the document average.
    pub fn base_level(&self, font_size: f32, stats: &FontStats) -> HeadingLevel {
        if font_size >= stats.avg * self.h1_ratio {
            HeadingLevel::H1
        } else if font_size >= stats.avg * self.h2_ratio {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        }
    }

    /// Final level: a structural override when the text has one, otherwise
    /// the size-based level.
    pub fn assign(&self, line: &Line, stats: &FontStats) -> HeadingLevel {
        self.patterns
            .level_override(line.text.trim())
            .unwrap_or_else(|| self.base_level(line.font_size, stats))
    }
}
