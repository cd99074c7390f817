pub mod pdftotext;

use crate::error::PdftabError;
use std::path::Path;

/// An opened document whose pages can be read as text.
///
/// Whatever the document holds (file handles, buffered output) is
/// released when it is dropped.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (zero-based), lines separated by `\n`
    /// in visual layout order.
    fn page_text(&self, index: usize) -> Result<String, PdftabError>;
}

/// Trait for page text extraction backends.
pub trait PageTextSource: Send + Sync {
    /// Open the document at `path` for page-by-page text retrieval.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, PdftabError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Read every page of the document at `path`, in page order.
///
/// The document is closed before returning, on success and on error.
pub fn read_pages(source: &dyn PageTextSource, path: &Path) -> Result<Vec<String>, PdftabError> {
    let document = source.open(path)?;
    (0..document.page_count())
        .map(|index| document.page_text(index))
        .collect()
}
