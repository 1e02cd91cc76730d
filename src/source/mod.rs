//! Page-content parser abstraction.
//!
//! The outline pipeline only needs, for each page, the spans of every
//! layout line. [`DocumentSource`] isolates that from the concrete PDF
//! library so the pipeline can run over lopdf documents or in-memory ones.

mod memory;
mod pdf;

pub use pdf::LopdfSource;
pub use memory::MemorySource;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::Span;

/// Document information entries, keyed by lower-case name ("title", "author", ...).
pub type Metadata = BTreeMap<String, String>;

/// The spans of one layout line, in reading order.
pub type SpanLine = Vec<Span>;

/// Abstract interface for reading a page-oriented document.
pub trait DocumentSource {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Document information entries.
    fn metadata(&self) -> &Metadata;

    /// Spans of a page grouped by layout line (`index` is 0-based).
    fn page_lines(&self, index: usize) -> Result<Vec<SpanLine>>;

    /// Metadata title, trimmed; `None` when absent or blank.
    fn title(&self) -> Option<&str> {
        self.metadata()
            .get("title")
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}
