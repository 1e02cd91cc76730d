//! Line extraction: merge layout lines into [`Line`]s and drop noise.

use crate::config::OutlineConfig;
use crate::model::Line;
use crate::patterns::PatternLibrary;
use crate::source::SpanLine;

/// Turns a page's span lines into candidate lines.
#[derive(Debug, Clone, Copy)]
pub struct LineExtractor<'a> {
    patterns: &'a PatternLibrary,
    min_chars: usize,
}

impl<'a> LineExtractor<'a> {
    /// Create an extractor.
    pub fn new(patterns: &'a PatternLibrary, config: &OutlineConfig) -> Self {
        Self {
            patterns,
            min_chars: config.min_line_chars,
        }
    }

    /// Merge each layout line and keep the ones that are not noise.
    pub fn extract(&self, lines: &[SpanLine]) -> Vec<Line> {
        lines
            .iter()
            .filter_map(|spans| Line::from_spans(spans))
            .filter(|line| !self.is_footer_or_header(&line.text))
            .collect()
    }

    /// Too short to carry meaning, or matches a footer/header pattern.
    pub fn is_footer_or_header(&self, text: &str) -> bool {
        let text = text.trim();
        text.chars().count() < self.min_chars || self.patterns.is_noise(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;

    fn extract(lines: Vec<SpanLine>) -> Vec<Line> {
        let config = OutlineConfig::default();
        LineExtractor::new(PatternLibrary::standard(), &config).extract(&lines)
    }

    #[test]
    fn test_short_and_noise_lines_dropped() {
        let lines = extract(vec![
            vec![Span::new("12", 30.0)],
            vec![Span::new("Page 3 of 10", 30.0)],
            vec![Span::new("May 31, 2014", 12.0)],
            vec![Span::new("Results", 14.0)],
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Results");
    }

    #[test]
    fn test_spans_joined() {
        let lines = extract(vec![vec![
            Span::new("2.1", 12.0).bold(),
            Span::new("SCOPE", 14.0),
        ]]);
        assert_eq!(lines[0].text, "2.1 SCOPE");
        assert_eq!(lines[0].font_size, 14.0);
        assert!(lines[0].is_bold);
        assert!(lines[0].is_uppercase);
    }

    #[test]
    fn test_three_chars_kept() {
        let lines = extract(vec![vec![Span::new(" FAQ ", 12.0)]]);
        assert_eq!(lines.len(), 1);
    }
}
