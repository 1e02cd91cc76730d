//! Outline assembly.
//!
//! [`OutlineExtractor`] drives one document through the pipeline:
//! font statistics, per-page heading detection, cleanup and title
//! resolution. Each document gets fresh state; the extractor itself only
//! holds configuration and compiled patterns and can be shared across
//! threads.

use std::fmt;
use std::path::Path;

use crate::analysis::{
    clean_headings, FontAnalyzer, HeadingClassifier, LevelAssigner, LineExtractor,
};
use crate::config::OutlineConfig;
use crate::error::{Error, Result};
use crate::model::{title_from_filename, FontStats, Heading, HeadingLevel, Line, Outline};
use crate::patterns::PatternLibrary;
use crate::source::{DocumentSource, LopdfSource, SpanLine};

/// Pipeline stage of a document, traced at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    Init,
    FontAnalyzed,
    PageScan,
    TitleResolution,
    Done,
    Error,
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionState::Init => "init",
            ExtractionState::FontAnalyzed => "font-analyzed",
            ExtractionState::PageScan => "page-scan",
            ExtractionState::TitleResolution => "title-resolution",
            ExtractionState::Done => "done",
            ExtractionState::Error => "error",
        };
        f.write_str(name)
    }
}

fn trace(name: &str, state: ExtractionState) {
    log::debug!("{}: {}", name, state);
}

/// Heading outline extractor.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::OutlineExtractor;
///
/// let extractor = OutlineExtractor::new();
/// let outline = extractor.extract_file("report.pdf");
/// println!("{} ({} headings)", outline.title, outline.len());
/// ```
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    patterns: PatternLibrary,
}

/// Headings gathered while scanning pages.
#[derive(Debug, Default)]
struct PageScan {
    title_candidates: Vec<String>,
    headings: Vec<Heading>,
    first_page: Vec<Line>,
}

impl OutlineExtractor {
    /// Extractor with the default configuration.
    pub fn new() -> Self {
        Self {
            config: OutlineConfig::default(),
            patterns: PatternLibrary::standard().clone(),
        }
    }

    /// Extractor with a custom configuration.
    ///
    /// Fails if the configuration is invalid or an extra noise pattern
    /// does not compile.
    pub fn with_config(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        let patterns = PatternLibrary::with_extra_noise(&config.extra_noise_patterns)?;
        Ok(Self { config, patterns })
    }

    /// The active configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Extract the outline of a PDF file.
    ///
    /// Never fails: when the file cannot be opened the result is the
    /// fallback outline, titled after the file name.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Outline {
        let path = path.as_ref();
        match self.try_extract_file(path) {
            Ok(outline) => outline,
            Err(e) => {
                let name = display_name(path);
                log::error!("Error processing PDF {}: {}", path.display(), e);
                trace(&name, ExtractionState::Error);
                Outline::fallback(&name)
            }
        }
    }

    /// Extract the outline of a PDF file, reporting open failures.
    pub fn try_extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let path = path.as_ref();
        let source = LopdfSource::open(path).map_err(|e| Error::open(path, e))?;
        Ok(self.extract_source(&source, &display_name(path)))
    }

    /// Font statistics of a document.
    pub fn font_stats(&self, source: &dyn DocumentSource) -> FontStats {
        FontAnalyzer::new(&self.config).analyze(source)
    }

    /// Extract the outline of an opened document.
    ///
    /// `name` is the document's file name; it is used in log messages and
    /// as the title of last resort.
    pub fn extract_source(&self, source: &dyn DocumentSource, name: &str) -> Outline {
        trace(name, ExtractionState::Init);

        let pages = self.read_pages(source, name);
        let stats = FontAnalyzer::new(&self.config)
            .analyze_pages(pages.iter().map(|(_, lines)| lines.as_slice()));
        log::debug!(
            "{}: font stats avg={:.2} q75={:.2} q90={:.2}",
            name,
            stats.avg,
            stats.q75,
            stats.q90
        );
        trace(name, ExtractionState::FontAnalyzed);

        trace(name, ExtractionState::PageScan);
        let scan = self.scan_pages(&pages, &stats);

        trace(name, ExtractionState::TitleResolution);
        let outline = self.resolve(source, name, scan, &stats);
        trace(name, ExtractionState::Done);
        outline
    }

    /// Read the bounded page prefix once; unreadable pages are skipped.
    fn read_pages(&self, source: &dyn DocumentSource, name: &str) -> Vec<(usize, Vec<SpanLine>)> {
        let scanned = source.page_count().min(self.config.max_pages);
        (0..scanned)
            .filter_map(|index| match source.page_lines(index) {
                Ok(lines) => Some((index, lines)),
                Err(e) => {
                    log::warn!("{}: skipping page {}: {}", name, index + 1, e);
                    None
                }
            })
            .collect()
    }

    fn scan_pages(&self, pages: &[(usize, Vec<SpanLine>)], stats: &FontStats) -> PageScan {
        let extractor = LineExtractor::new(&self.patterns, &self.config);
        let classifier = HeadingClassifier::new(&self.patterns, &self.config);
        let assigner = LevelAssigner::new(&self.patterns, &self.config);

        let mut scan = PageScan::default();
        for (index, spans) in pages {
            let lines = extractor.extract(spans);
            for line in &lines {
                if !classifier.is_heading(line, stats) {
                    continue;
                }
                let level = assigner.assign(line, stats);
                if level == HeadingLevel::H1 && *index == 0 {
                    scan.title_candidates.push(line.text.clone());
                } else {
                    scan.headings
                        .push(Heading::new(level, line.text.clone(), *index as u32 + 1));
                }
            }
            if *index == 0 {
                scan.first_page = lines;
            }
        }
        scan
    }

    fn resolve(
        &self,
        source: &dyn DocumentSource,
        name: &str,
        scan: PageScan,
        stats: &FontStats,
    ) -> Outline {
        let mut title = match source.title() {
            Some(title) => title.to_string(),
            None => scan.title_candidates.join(" "),
        };

        if source.page_count() == 1 && scan.headings.len() > self.config.oversegment_limit {
            log::info!(
                "{}: {} headings on a single page, discarding outline",
                name,
                scan.headings.len()
            );
            if let Some(line) = scan
                .first_page
                .iter()
                .find(|line| line.font_size >= stats.q90 && line.is_bold)
            {
                title = line.text.clone();
            }
            if title.trim().is_empty() {
                title = title_from_filename(name);
            }
            return Outline::new(&title, Vec::new());
        }

        let mut headings = clean_headings(scan.headings);
        if title.trim().is_empty() {
            let promote = headings
                .first()
                .is_some_and(|first| first.level == HeadingLevel::H1);
            title = if promote {
                headings.remove(0).text
            } else {
                title_from_filename(name)
            };
        }
        Outline::new(&title, headings)
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use crate::source::MemorySource;

    fn body(text: &str) -> Span {
        Span::new(text, 10.0)
    }

    #[test]
    fn test_first_page_h1_becomes_title() {
        let doc = MemorySource::new()
            .simple_page(vec![
                Span::new("Quarterly Review", 24.0),
                body("the numbers are described below."),
                body("more body text follows here."),
            ])
            .simple_page(vec![
                Span::new("Revenue", 24.0),
                body("revenue grew in every region."),
            ]);
        let outline = OutlineExtractor::new().extract_source(&doc, "q.pdf");
        assert_eq!(outline.title, "Quarterly Review ");
        assert_eq!(outline.outline, vec![Heading::new(HeadingLevel::H1, "Revenue", 2)]);
    }

    #[test]
    fn test_first_heading_promoted() {
        let doc = MemorySource::new()
            .simple_page(vec![body("plain opening text appears here.")])
            .simple_page(vec![
                Span::new("Overview", 24.0),
                body("body text fills the page here."),
                Span::new("Details", 16.0).bold(),
            ]);
        let outline = OutlineExtractor::new().extract_source(&doc, "notes.pdf");
        assert_eq!(outline.title, "Overview ");
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.outline[0].text, "Details");
    }

    #[test]
    fn test_filename_title_when_nothing_else() {
        let doc =
            MemorySource::new().simple_page(vec![body("This paragraph is plain body text.")]);
        let outline = OutlineExtractor::new().extract_source(&doc, "meeting_notes.pdf");
        assert_eq!(outline.title, "Meeting Notes ");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let outline = OutlineExtractor::new().extract_file("/nonexistent/dir/field_report.pdf");
        assert_eq!(outline.title, "Field Report ");
        assert!(outline.is_empty());

        let err = OutlineExtractor::new()
            .try_extract_file("/nonexistent/dir/field_report.pdf")
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn test_invalid_extra_noise_rejected() {
        let config = OutlineConfig::default().with_noise_pattern("([");
        assert!(OutlineExtractor::with_config(config).is_err());
    }

    #[test]
    fn test_extra_noise_pattern_applied() {
        let config = OutlineConfig::default().with_noise_pattern(r"^CONFIDENTIAL$");
        let extractor = OutlineExtractor::with_config(config).unwrap();
        let doc = MemorySource::new()
            .with_title("Memo")
            .simple_page(vec![body("intro text for the memo below.")])
            .simple_page(vec![Span::new("CONFIDENTIAL", 20.0), body("body text of the memo follows.")]);
        let outline = extractor.extract_source(&doc, "memo.pdf");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ExtractionState::TitleResolution.to_string(), "title-resolution");
    }
}
