//! Sequencing of one extraction run.
//!
//! A run moves `Idle -> Scanning -> Processing -> Finalizing` and ends in
//! `Done` or `Failed`. Documents are handled one at a time; a document
//! that fails to open or read is logged and skipped, only a listing or
//! write failure ends the run in `Failed`.

use crate::aggregate::Aggregator;
use crate::error::PdftabError;
use crate::extract_document_rows;
use crate::extraction::PageTextSource;
use crate::locator::{locate_documents, DocumentRef};
use crate::writer::DelimitedWriter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Scanning,
    Processing { current: usize, total: usize },
    Finalizing,
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    NoInputFound,
    NoDataExtracted,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    /// Human-readable status line for the terminal state.
    pub message: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<DocumentFailure>,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunSummary {
    fn failed(message: String) -> Self {
        RunSummary {
            status: RunStatus::Failed,
            message,
            attempted: 0,
            succeeded: 0,
            failed: Vec::new(),
            total_rows: 0,
            output: None,
        }
    }
}

/// Notifications pushed from the worker, in emission order.
/// `Finished` is always the last event of a run.
#[derive(Debug, Clone)]
pub enum RunEvent {
    Progress(u8),
    Log(String),
    Finished(RunSummary),
}

/// Receiver of progress and log notifications.
pub trait ProgressSink {
    fn on_progress(&self, percent: u8);
    fn on_log(&self, message: &str);
}

impl ProgressSink for mpsc::Sender<RunEvent> {
    fn on_progress(&self, percent: u8) {
        // A dropped receiver must not stall the worker.
        let _ = self.send(RunEvent::Progress(percent));
    }

    fn on_log(&self, message: &str) {
        let _ = self.send(RunEvent::Log(message.to_string()));
    }
}

/// Input and output locations for a run, as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub writer: DelimitedWriter,
}

impl RunRequest {
    pub fn new(input_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        RunRequest {
            input_dir: Some(input_dir.into()),
            output: Some(output.into()),
            writer: DelimitedWriter::default(),
        }
    }

    pub fn with_writer(mut self, writer: DelimitedWriter) -> Self {
        self.writer = writer;
        self
    }

    fn validate(&self) -> Result<(PathBuf, PathBuf), PdftabError> {
        let input_dir = self
            .input_dir
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(PdftabError::MissingInput("please select input directory"))?;
        let output = self
            .output
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(PdftabError::MissingInput("please select output file"))?;
        Ok((input_dir, output))
    }
}

/// Runs the pipeline on the calling thread, reporting to `sink`.
pub struct Orchestrator<'a> {
    source: &'a dyn PageTextSource,
    writer: DelimitedWriter,
    sink: &'a dyn ProgressSink,
    state: RunState,
    last_progress: u8,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        source: &'a dyn PageTextSource,
        writer: DelimitedWriter,
        sink: &'a dyn ProgressSink,
    ) -> Self {
        Orchestrator {
            source,
            writer,
            sink,
            state: RunState::Idle,
            last_progress: 0,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Validate `request` and run it to a terminal state.
    ///
    /// Only a missing input or output location is returned as an error;
    /// every other outcome, including `Failed`, is a summary.
    pub fn run(&mut self, request: &RunRequest) -> Result<RunSummary, PdftabError> {
        let (input_dir, output) = request.validate()?;
        Ok(self.run_validated(&input_dir, &output))
    }

    fn run_validated(&mut self, input_dir: &Path, output: &Path) -> RunSummary {
        self.last_progress = 0;
        tracing::debug!(
            backend = self.source.backend_name(),
            input = %input_dir.display(),
            output = %output.display(),
            "starting run"
        );
        self.transition(RunState::Scanning);
        let documents = match locate_documents(input_dir) {
            Ok(documents) => documents,
            Err(e) => {
                self.sink.on_log(&format!("Unexpected error: {e}"));
                self.transition(RunState::Failed);
                return RunSummary::failed(format!("Error occurred: {e}"));
            }
        };

        if documents.is_empty() {
            self.sink.on_log("No PDF files found in the directory");
            self.transition(RunState::Done);
            return RunSummary {
                status: RunStatus::NoInputFound,
                message: "No PDF files found".into(),
                attempted: 0,
                succeeded: 0,
                failed: Vec::new(),
                total_rows: 0,
                output: None,
            };
        }

        self.sink
            .on_log(&format!("Found {} PDF files", documents.len()));
        self.sink.on_log("Starting PDF extraction...");

        let (aggregate, failed) = self.process(&documents);
        self.finalize(aggregate, failed, output)
    }

    fn process(&mut self, documents: &[DocumentRef]) -> (Aggregator, Vec<DocumentFailure>) {
        let total = documents.len();
        let mut aggregate = Aggregator::new(total);
        let mut failed = Vec::new();

        for (i, document) in documents.iter().enumerate() {
            self.transition(RunState::Processing {
                current: i + 1,
                total,
            });
            self.sink.on_log(&format!("Processing: {}", document.name));

            match extract_document_rows(self.source, &document.path) {
                Ok(rows) => {
                    let count = rows.len();
                    aggregate.append(rows);
                    aggregate.mark_succeeded();
                    self.sink.on_log(&format!(
                        "✓ Successfully processed {} ({count} rows)",
                        document.name
                    ));
                }
                Err(e) => {
                    tracing::warn!(document = %document.name, error = %e, "document skipped");
                    self.sink
                        .on_log(&format!("✗ Error processing {}: {e}", document.name));
                    failed.push(DocumentFailure {
                        name: document.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            self.report_progress(i + 1, total);
        }

        (aggregate, failed)
    }

    fn finalize(
        &mut self,
        aggregate: Aggregator,
        failed: Vec<DocumentFailure>,
        output: &Path,
    ) -> RunSummary {
        self.transition(RunState::Finalizing);
        let mut summary = RunSummary {
            status: RunStatus::Completed,
            message: String::new(),
            attempted: aggregate.candidates(),
            succeeded: aggregate.succeeded(),
            failed,
            total_rows: aggregate.total_rows(),
            output: None,
        };

        if aggregate.is_empty() {
            self.sink.on_log("No table data found in the PDF files");
            self.transition(RunState::Done);
            summary.status = RunStatus::NoDataExtracted;
            summary.message = "No table data found".into();
            return summary;
        }

        if let Err(e) = self.writer.write(output, aggregate.snapshot()) {
            self.sink.on_log(&format!("Unexpected error: {e}"));
            self.transition(RunState::Failed);
            summary.status = RunStatus::Failed;
            summary.message = format!("Error occurred: {e}");
            return summary;
        }

        self.sink
            .on_log(&format!("CSV saved to: {}", output.display()));
        self.sink.on_log(&format!(
            "Processed {} of {} PDF files with {} total rows",
            summary.succeeded, summary.attempted, summary.total_rows
        ));
        self.transition(RunState::Done);
        summary.message = format!(
            "Completed: {} files processed, {} rows extracted",
            summary.succeeded, summary.total_rows
        );
        summary.output = Some(output.to_path_buf());
        summary
    }

    fn report_progress(&mut self, attempted: usize, total: usize) {
        let percent = (attempted.saturating_mul(100) / total.max(1)).min(100) as u8;
        let percent = percent.max(self.last_progress);
        self.last_progress = percent;
        self.sink.on_progress(percent);
    }

    fn transition(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
    }
}

/// Starts runs on a background worker, one at a time.
#[derive(Debug, Clone, Default)]
pub struct RunController {
    busy: Arc<AtomicBool>,
}

impl RunController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Validate `request` on the calling thread and start it on a worker.
    ///
    /// Fails with `MissingInput` without spawning anything, and with
    /// `RunInProgress` while an earlier run has not finished.
    pub fn start(
        &self,
        request: RunRequest,
        source: Arc<dyn PageTextSource>,
    ) -> Result<RunHandle, PdftabError> {
        let (input_dir, output) = request.validate()?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PdftabError::RunInProgress);
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let (tx, rx) = mpsc::channel();
        let writer = request.writer;
        let worker = std::thread::Builder::new()
            .name("pdftab-worker".into())
            .spawn(move || {
                let summary = {
                    let mut orchestrator = Orchestrator::new(&*source, writer, &tx);
                    orchestrator.run_validated(&input_dir, &output)
                };
                drop(guard);
                let _ = tx.send(RunEvent::Finished(summary.clone()));
                summary
            })?;

        Ok(RunHandle { events: rx, worker })
    }
}

/// Clears the busy flag when the worker finishes, including on panic.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A run in progress on its worker thread.
pub struct RunHandle {
    events: mpsc::Receiver<RunEvent>,
    worker: JoinHandle<RunSummary>,
}

impl RunHandle {
    pub fn events(&self) -> &mpsc::Receiver<RunEvent> {
        &self.events
    }

    /// Wait for the worker and return its summary.
    pub fn join(self) -> RunSummary {
        self.worker
            .join()
            .unwrap_or_else(|_| RunSummary::failed("Error occurred: worker thread panicked".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PdfDocument;
    use std::cell::RefCell;

    struct NoSource;

    impl PageTextSource for NoSource {
        fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, PdftabError> {
            Err(PdftabError::DocumentOpen {
                path: path.to_path_buf(),
                reason: "not a PDF".into(),
            })
        }

        fn backend_name(&self) -> &str {
            "none"
        }
    }

    #[derive(Default)]
    struct Recorder {
        progress: RefCell<Vec<u8>>,
        logs: RefCell<Vec<String>>,
    }

    impl ProgressSink for Recorder {
        fn on_progress(&self, percent: u8) {
            self.progress.borrow_mut().push(percent);
        }

        fn on_log(&self, message: &str) {
            self.logs.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_missing_input_is_rejected_before_running() {
        let recorder = Recorder::default();
        let mut orch = Orchestrator::new(&NoSource, DelimitedWriter::default(), &recorder);

        let request = RunRequest {
            input_dir: None,
            output: Some("out.csv".into()),
            ..Default::default()
        };
        assert!(matches!(
            orch.run(&request),
            Err(PdftabError::MissingInput(_))
        ));

        let request = RunRequest {
            input_dir: Some("in".into()),
            output: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(matches!(
            orch.run(&request),
            Err(PdftabError::MissingInput(_))
        ));

        assert_eq!(orch.state(), &RunState::Idle);
        assert!(recorder.logs.borrow().is_empty());
    }

    #[test]
    fn test_progress_is_emitted_for_failed_documents() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let recorder = Recorder::default();
        let mut orch = Orchestrator::new(&NoSource, DelimitedWriter::default(), &recorder);
        let summary = orch
            .run(&RunRequest::new(dir.path(), dir.path().join("out.csv")))
            .unwrap();

        assert_eq!(*recorder.progress.borrow(), vec![33, 66, 100]);
        assert_eq!(summary.status, RunStatus::NoDataExtracted);
        assert_eq!(summary.failed.len(), 3);
        assert_eq!(orch.state(), &RunState::Done);
    }

    #[test]
    fn test_unreadable_directory_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let mut orch = Orchestrator::new(&NoSource, DelimitedWriter::default(), &recorder);
        let summary = orch
            .run(&RunRequest::new(
                dir.path().join("missing"),
                dir.path().join("out.csv"),
            ))
            .unwrap();

        assert_eq!(summary.status, RunStatus::Failed);
        assert!(summary.message.starts_with("Error occurred"));
        assert_eq!(orch.state(), &RunState::Failed);
        assert!(orch.state().is_terminal());
        assert!(recorder.progress.borrow().is_empty());
    }

    #[test]
    fn test_progress_rounds_down_and_is_monotonic() {
        let recorder = Recorder::default();
        let mut orch = Orchestrator::new(&NoSource, DelimitedWriter::default(), &recorder);
        for attempted in 1..=7 {
            orch.report_progress(attempted, 7);
        }
        let progress = recorder.progress.borrow();
        assert_eq!(*progress, vec![14, 28, 42, 57, 71, 85, 100]);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    }
}
