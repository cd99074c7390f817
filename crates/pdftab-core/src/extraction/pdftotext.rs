use crate::error::PdftabError;
use crate::extraction::{PageTextSource, PdfDocument};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Page text backend using pdftotext (from poppler-utils).
///
/// With `layout` enabled, `pdftotext -layout` keeps column gaps as runs of
/// spaces, which is what the row heuristic keys on.
pub struct PdftotextExtractor {
    binary: PathBuf,
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor {
            binary: PathBuf::from("pdftotext"),
            layout: true,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTextSource for PdftotextExtractor {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, PdftabError> {
        let mut command = Command::new(&self.binary);
        if self.layout {
            command.arg("-layout");
        }
        let output = command
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PdftabError::PdftotextNotFound
                } else {
                    PdftabError::DocumentOpen {
                        path: path.to_path_buf(),
                        reason: format!("pdftotext failed: {e}"),
                    }
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PdftabError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(Box::new(PdftotextDocument {
            path: path.to_path_buf(),
            pages: split_pages(&text),
        }))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Document text captured from a single pdftotext invocation.
struct PdftotextDocument {
    path: PathBuf,
    pages: Vec<String>,
}

impl PdfDocument for PdftotextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, PdftabError> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| PdftabError::PageRead {
                path: self.path.clone(),
                page: index + 1,
                reason: format!("document has {} page(s)", self.pages.len()),
            })
    }
}

/// Split pdftotext output into pages.
///
/// pdftotext terminates every page with a form feed (`\x0c`), so the
/// segment after the last one is not a page.
fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split('\x0c').map(|p| p.to_string()).collect();
    if text.ends_with('\x0c') || pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}
