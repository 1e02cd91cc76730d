//! # pdfoutline
//!
//! Heading outline extraction for PDF documents.
//!
//! This library infers a document's title and its H1/H2/H3 heading
//! hierarchy from font sizes, styles and lexical cues, and renders the
//! result as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!
//!     for heading in &outline.outline {
//!         println!("{} {} (page {})", heading.level, heading.text, heading.page);
//!     }
//!
//!     let json = render::to_json(&outline, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font statistics**: per-document average and percentile font sizes
//! - **Heading detection**: size, weight, numbering and keyword cues
//! - **CJK support**: chapter and section markers such as `第1章`
//! - **Noise filtering**: page numbers, dates and running headers
//! - **Batch processing**: whole directories, in parallel with Rayon

pub mod analysis;
pub mod batch;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod patterns;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use batch::{process_directory, BatchReport, DocumentReport};
pub use config::OutlineConfig;
pub use error::{Error, Result};
pub use extractor::{ExtractionState, OutlineExtractor};
pub use model::{FontStats, Heading, HeadingLevel, Outline};
pub use render::JsonFormat;
pub use source::{DocumentSource, LopdfSource, MemorySource};

use std::path::Path;

/// Extract the heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// println!("Title: {}", outline.title);
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    OutlineExtractor::new().try_extract_file(path)
}

/// Extract the heading outline of a PDF file with a custom configuration.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_with_config, OutlineConfig};
///
/// let config = OutlineConfig::new()
///     .with_max_pages(10)
///     .with_noise_pattern(r"(?i)^confidential$");
/// let outline = extract_outline_with_config("document.pdf", config).unwrap();
/// ```
pub fn extract_outline_with_config<P: AsRef<Path>>(
    path: P,
    config: OutlineConfig,
) -> Result<Outline> {
    OutlineExtractor::with_config(config)?.try_extract_file(path)
}

/// Extract the heading outline of a PDF file as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{outline_to_json, JsonFormat};
///
/// let json = outline_to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn outline_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline(path)?;
    render::to_json(&outline, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_outline_missing_file() {
        let err = extract_outline("/nonexistent/missing.pdf").unwrap_err();
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn test_extract_with_invalid_config() {
        let config = OutlineConfig::new().with_level_ratios(1.2, 1.4);
        let result = extract_outline_with_config("/nonexistent/missing.pdf", config);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
