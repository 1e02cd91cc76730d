//! In-memory document source.

use super::{DocumentSource, Metadata, SpanLine};
use crate::error::{Error, Result};
use crate::model::Span;

/// A page of an in-memory document.
#[derive(Debug, Clone)]
enum MemoryPage {
    Lines(Vec<SpanLine>),
    Broken(String),
}

/// A document held in memory, built line by line.
///
/// # Example
///
/// ```
/// use pdfoutline::model::Span;
/// use pdfoutline::source::{DocumentSource, MemorySource};
///
/// let doc = MemorySource::new()
///     .with_title("Field Guide")
///     .page(vec![vec![Span::new("1. Introduction", 18.0)]]);
/// assert_eq!(doc.page_count(), 1);
/// assert_eq!(doc.title(), Some("Field Guide"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    metadata: Metadata,
    pages: Vec<MemoryPage>,
}

impl MemorySource {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into().to_lowercase(), value.into());
        self
    }

    /// Set the metadata title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_metadata("title", title)
    }

    /// Append a page made of layout lines.
    pub fn page(mut self, lines: Vec<SpanLine>) -> Self {
        self.pages.push(MemoryPage::Lines(lines));
        self
    }

    /// Append a page where each line is a single span.
    pub fn simple_page(self, lines: Vec<Span>) -> Self {
        self.page(lines.into_iter().map(|span| vec![span]).collect())
    }

    /// Append a page whose extraction fails.
    pub fn broken_page(mut self, message: impl Into<String>) -> Self {
        self.pages.push(MemoryPage::Broken(message.into()));
        self
    }
}

impl DocumentSource for MemorySource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn page_lines(&self, index: usize) -> Result<Vec<SpanLine>> {
        match self.pages.get(index) {
            Some(MemoryPage::Lines(lines)) => Ok(lines.clone()),
            Some(MemoryPage::Broken(message)) => Err(Error::page(index + 1, message.clone())),
            None => Err(Error::PageOutOfRange(index + 1, self.pages.len())),
        }
    }
}
