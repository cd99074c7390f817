use crate::error::PdftabError;
use std::path::{Path, PathBuf};

/// One input file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: PathBuf,
    pub name: String,
}

/// List the `.pdf` files (any case) directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into. An existing directory without
/// matches yields an empty list, not an error.
pub fn locate_documents(dir: &Path) -> Result<Vec<DocumentRef>, PdftabError> {
    let unreadable = |e: std::io::Error| PdftabError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !has_pdf_extension(&name) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory with .pdf suffix");
            continue;
        }
        documents.push(DocumentRef { path, name });
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), count = documents.len(), "located documents");
    Ok(documents)
}

fn has_pdf_extension(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}
