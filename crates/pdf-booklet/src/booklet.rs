//! Booklet job orchestration
//!
//! 1. Load the source PDF
//! 2. Plan the booklet order
//! 3. Copy pages (and blank padding) into a new document in that order
//! 4. Write the result

use crate::document::{DocumentSink, assemble_booklet};
use crate::options::BookletOptions;
use crate::pdf::{PdfSink, PdfSource, load_pdf};
use crate::types::*;
use std::fmt;
use std::path::PathBuf;

/// Summary of a finished booklet job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletReport {
    pub orientation: Orientation,
    pub input_pages: usize,
    pub output_pages: usize,
    pub blank_pages: usize,
    pub sheets: usize,
    pub output: PathBuf,
}

impl fmt::Display for BookletReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode        : {}", self.orientation)?;
        writeln!(f, "Input pages : {}", self.input_pages)?;
        writeln!(f, "Output pages: {}", self.output_pages)?;
        write!(f, "Saved to    : {}", self.output.display())
    }
}

/// Reorder `options.input_file` for booklet printing and save it to
/// `options.output_file`
pub async fn make_booklet(options: &BookletOptions) -> Result<BookletReport> {
    options.validate()?;

    let document = load_pdf(&options.input_file).await?;
    let options = options.clone();

    tokio::task::spawn_blocking(move || make_booklet_sync(document, &options)).await?
}

fn make_booklet_sync(document: lopdf::Document, options: &BookletOptions) -> Result<BookletReport> {
    let source = PdfSource::new(document);
    let mut sink = PdfSink::new();

    let plan = assemble_booklet(&source, &mut sink, options.orientation)?;
    sink.finish(&options.output_file)?;

    log::info!(
        "Saved {}-page booklet ({} sheets) to {}",
        plan.padded_count(),
        plan.sheet_count(),
        options.output_file.display()
    );

    Ok(BookletReport {
        orientation: plan.orientation(),
        input_pages: plan.page_count(),
        output_pages: plan.padded_count(),
        blank_pages: plan.blank_count(),
        sheets: plan.sheet_count(),
        output: options.output_file.clone(),
    })
}
