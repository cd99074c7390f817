use pdftab_core::error::PdftabError;
use pdftab_core::orchestrator::{RunController, RunEvent, RunRequest, RunStatus};
use std::path::PathBuf;
use std::sync::Arc;

use super::resolve_config;
use crate::output;
use crate::ExtractOptions;

pub fn run(
    input_dir: PathBuf,
    out: PathBuf,
    options: &ExtractOptions,
    output_format: &str,
) -> Result<i32, PdftabError> {
    let config = resolve_config(options)?;
    let extractor = config.extractor();
    if !extractor.is_available() {
        return Err(PdftabError::PdftotextNotFound);
    }

    let request = RunRequest::new(input_dir, with_default_extension(out))
        .with_writer(config.writer());
    let controller = RunController::new();
    let handle = controller.start(request, Arc::new(extractor))?;

    // Events arrive in emission order; the channel closes when the worker ends.
    for event in handle.events().iter() {
        match event {
            RunEvent::Progress(percent) => eprintln!("[{percent:>3}%]"),
            RunEvent::Log(message) => eprintln!("{message}"),
            RunEvent::Finished(_) => {}
        }
    }
    let summary = handle.join();

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => output::table::print(&summary),
    }

    Ok(if summary.status == RunStatus::Failed { 1 } else { 0 })
}

/// Append `.csv` when the output path has no extension.
fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}
