//! Directory batch processing.
//!
//! Every `.pdf` file of an input directory is turned into a `<stem>.json`
//! outline in the output directory. Documents are independent: a failure
//! on one is recorded in the report and the batch moves on.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extractor::OutlineExtractor;
use crate::model::Outline;
use crate::render::{to_json, JsonFormat};

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Input PDF
    pub input: PathBuf,
    /// JSON file written for it
    pub output: PathBuf,
    /// Resolved title
    pub title: String,
    /// Number of headings in the outline
    pub headings: usize,
    /// Failure message; the fallback outline was written when extraction failed
    pub error: Option<String>,
}

impl DocumentReport {
    /// Whether the document was processed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no document was found.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents processed without error.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_ok()).count()
    }

    /// Documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| !d.is_ok())
    }

    /// Headings across all documents.
    pub fn total_headings(&self) -> usize {
        self.documents.iter().map(|d| d.headings).sum()
    }
}

/// PDF files directly inside `dir`, sorted by path.
///
/// The extension check is case-insensitive.
pub fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract the outline of every PDF in `input` into `output`.
///
/// The output directory is created if needed. `on_progress` is called once
/// per document as it completes, possibly from worker threads. Fails only
/// when the input directory cannot be listed or the output directory cannot
/// be created.
pub fn process_directory<F>(
    input: &Path,
    output: &Path,
    extractor: &OutlineExtractor,
    on_progress: F,
) -> Result<BatchReport>
where
    F: Fn(&DocumentReport) + Sync,
{
    let files = pdf_files(input)?;
    fs::create_dir_all(output)?;
    log::info!(
        "Processing {} PDF files from {} into {}",
        files.len(),
        input.display(),
        output.display()
    );

    let run = |path: &PathBuf| {
        let report = process_document(path, output, extractor);
        on_progress(&report);
        report
    };

    let documents = if extractor.config().parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    Ok(BatchReport { documents })
}

fn process_document(path: &Path, output: &Path, extractor: &OutlineExtractor) -> DocumentReport {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = output.join(format!("{}.json", stem));

    let (outline, mut error) = match extractor.try_extract_file(path) {
        Ok(outline) => (outline, None),
        Err(e) => {
            log::error!("Error processing PDF {}: {}", path.display(), e);
            (Outline::fallback(&file_name), Some(e.to_string()))
        }
    };

    if let Err(e) = write_outline(&outline, &target) {
        log::error!("Cannot write {}: {}", target.display(), e);
        error = Some(e.to_string());
    } else {
        log::info!("Processed: {}", file_name);
    }

    DocumentReport {
        input: path.to_path_buf(),
        output: target,
        title: outline.title,
        headings: outline.outline.len(),
        error,
    }
}

fn write_outline(outline: &Outline, target: &Path) -> Result<()> {
    let json = to_json(outline, JsonFormat::Pretty)?;
    fs::write(target, json).map_err(Error::from)
}
