use crate::rows::Row;

/// Append-only collection of rows across a run, in processing order.
#[derive(Debug, Default)]
pub struct Aggregator {
    rows: Vec<Row>,
    candidates: usize,
    succeeded: usize,
}

impl Aggregator {
    pub fn new(candidates: usize) -> Self {
        Aggregator {
            rows: Vec::new(),
            candidates,
            succeeded: 0,
        }
    }

    pub fn append(&mut self, rows: Vec<Row>) {
        self.rows.extend(rows);
    }

    /// Record a document whose rows have all been appended.
    pub fn mark_succeeded(&mut self) {
        self.succeeded += 1;
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn snapshot(&self) -> &[Row] {
        &self.rows
    }
}
