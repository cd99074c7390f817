use pdftab_core::error::PdftabError;
use pdftab_core::locator::locate_documents;
use std::path::Path;

pub fn run(input_dir: &Path) -> Result<i32, PdftabError> {
    let documents = locate_documents(input_dir)?;
    if documents.is_empty() {
        eprintln!("No PDF files found in the directory");
        return Ok(0);
    }

    for doc in &documents {
        println!("{}", doc.name);
    }
    eprintln!("Found {} PDF files", documents.len());
    Ok(0)
}
