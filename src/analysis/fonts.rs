//! Font statistics analyzer.

use crate::config::OutlineConfig;
use crate::model::FontStats;
use crate::source::{DocumentSource, SpanLine};

/// Collects font sizes over a bounded prefix of pages.
#[derive(Debug, Clone, Copy)]
pub struct FontAnalyzer<'a> {
    config: &'a OutlineConfig,
}

impl<'a> FontAnalyzer<'a> {
    /// Create an analyzer.
    pub fn new(config: &'a OutlineConfig) -> Self {
        Self { config }
    }

    /// Read up to `max_pages` pages of `source` and compute statistics.
    ///
    /// Pages that fail to extract are skipped.
    pub fn analyze<S: DocumentSource + ?Sized>(&self, source: &S) -> FontStats {
        let scanned = source.page_count().min(self.config.max_pages);
        let mut pages = Vec::with_capacity(scanned);
        for index in 0..scanned {
            match source.page_lines(index) {
                Ok(lines) => pages.push(lines),
                Err(e) => log::debug!("Font analysis skips page {}: {}", index + 1, e),
            }
        }
        self.analyze_pages(pages.iter().map(Vec::as_slice))
    }

    /// Compute statistics from already extracted pages.
    ///
    /// Only spans with non-whitespace text contribute a sample.
    pub fn analyze_pages<'p, I>(&self, pages: I) -> FontStats
    where
        I: IntoIterator<Item = &'p [SpanLine]>,
    {
        let sizes: Vec<f32> = pages
            .into_iter()
            .flatten()
            .flatten()
            .filter(|span| span.has_text())
            .map(|span| span.font_size)
            .collect();

        FontStats::from_samples(
            sizes,
            self.config.q75_percentile,
            self.config.q90_percentile,
            self.config.default_stats,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use crate::source::MemorySource;

    #[test]
    fn test_no_text_gives_defaults() {
        let config = OutlineConfig::default();
        let doc = MemorySource::new()
            .page(vec![])
            .simple_page(vec![Span::new("   ", 30.0)]);
        assert_eq!(FontAnalyzer::new(&config).analyze(&doc), FontStats::DEFAULT);
    }

    #[test]
    fn test_broken_pages_are_skipped() {
        let config = OutlineConfig::default();
        let doc = MemorySource::new()
            .broken_page("bad xref")
            .simple_page(vec![Span::new("Body", 10.0), Span::new("Title", 20.0)]);
        let stats = FontAnalyzer::new(&config).analyze(&doc);
        assert_eq!(stats.avg, 15.0);
        assert_eq!(stats.q90, 20.0);
    }

    #[test]
    fn test_page_cap() {
        let config = OutlineConfig::default().with_max_pages(1);
        let doc = MemorySource::new()
            .simple_page(vec![Span::new("Body", 10.0)])
            .simple_page(vec![Span::new("Huge", 90.0)]);
        let stats = FontAnalyzer::new(&config).analyze(&doc);
        assert_eq!(stats.q90, 10.0);
    }

    #[test]
    fn test_percentiles_are_ordered() {
        let config = OutlineConfig::default();
        let mut spans: Vec<Span> = (0..30).map(|_| Span::new("body text", 10.0)).collect();
        spans.extend((0..14).map(|_| Span::new("lead paragraph", 12.0)));
        spans.extend((0..4).map(|_| Span::new("heading", 18.0)));
        let doc = MemorySource::new().simple_page(spans);

        let stats = FontAnalyzer::new(&config).analyze(&doc);
        assert!(stats.avg <= stats.q75);
        assert!(stats.q75 <= stats.q90);
        assert_eq!(stats.q75, 12.0);
        assert_eq!(stats.q90, 12.0);
        assert!((stats.avg - 11.25).abs() < 1e-4);
    }
}
