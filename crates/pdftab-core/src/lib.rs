pub mod aggregate;
pub mod config;
pub mod error;
pub mod extraction;
pub mod locator;
pub mod orchestrator;
pub mod rows;
pub mod writer;

use error::PdftabError;
use extraction::PageTextSource;
use orchestrator::{Orchestrator, ProgressSink, RunRequest, RunSummary};
use rows::{parse_page, Row};
use std::path::Path;

/// Extract the table-like rows of a single document, in page then line
/// order.
///
/// The document is opened through `source` and closed again before this
/// returns, whether or not every page could be read.
pub fn extract_document_rows(
    source: &dyn PageTextSource,
    path: &Path,
) -> Result<Vec<Row>, PdftabError> {
    let pages = extraction::read_pages(source, path)?;

    let mut rows = Vec::new();
    for (index, text) in pages.iter().enumerate() {
        let page_rows = parse_page(text);
        tracing::debug!(
            path = %path.display(),
            page = index + 1,
            rows = page_rows.len(),
            "parsed page"
        );
        rows.extend(page_rows);
    }

    Ok(rows)
}

/// Main API entry point: run the whole pipeline on the calling thread.
///
/// Use [`orchestrator::RunController`] to run it on a background worker
/// instead.
pub fn extract_directory(
    request: &RunRequest,
    source: &dyn PageTextSource,
    sink: &dyn ProgressSink,
) -> Result<RunSummary, PdftabError> {
    Orchestrator::new(source, request.writer, sink).run(request)
}
