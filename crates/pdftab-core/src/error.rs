use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PdftabError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("cannot read directory {path}: {reason}")]
    DirectoryUnreadable { path: PathBuf, reason: String },

    #[error("failed to open {path}: {reason}")]
    DocumentOpen { path: PathBuf, reason: String },

    #[error("failed to read page {page} of {path}: {reason}")]
    PageRead {
        path: PathBuf,
        page: usize,
        reason: String,
    },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("an extraction run is already in progress")]
    RunInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
