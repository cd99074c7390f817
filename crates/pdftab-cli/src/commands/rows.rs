use pdftab_core::error::PdftabError;
use pdftab_core::extract_document_rows;
use std::path::Path;

use super::resolve_config;
use crate::ExtractOptions;

pub fn run(pdf_file: &Path, options: &ExtractOptions) -> Result<i32, PdftabError> {
    let config = resolve_config(options)?;
    let extractor = config.extractor();
    let rows = extract_document_rows(&extractor, pdf_file)?;

    let stdout = std::io::stdout();
    config.writer().write_to(&mut stdout.lock(), &rows)?;
    eprintln!("{} row(s) extracted from {}", rows.len(), pdf_file.display());
    Ok(0)
}
