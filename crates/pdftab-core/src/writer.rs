use crate::error::PdftabError;
use crate::rows::Row;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const RECORD_TERMINATOR: &str = "\r\n";

/// Serializes rows as delimited text (CSV quoting, no header, ragged
/// records allowed). Output is UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedWriter {
    delimiter: char,
}

impl DelimitedWriter {
    pub fn new(delimiter: char) -> Self {
        DelimitedWriter { delimiter }
    }

    /// Create or overwrite `path` with one record per row.
    pub fn write(&self, path: &Path, rows: &[Row]) -> Result<(), PdftabError> {
        let write_error = |e: std::io::Error| PdftabError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let file = File::create(path).map_err(write_error)?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out, rows).map_err(write_error)?;
        out.into_inner()
            .map_err(|e| write_error(e.into_error()))?
            .sync_all()
            .map_err(write_error)?;

        tracing::info!(path = %path.display(), rows = rows.len(), "wrote delimited output");
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: &mut W, rows: &[Row]) -> std::io::Result<()> {
        for row in rows {
            out.write_all(self.format_record(row).as_bytes())?;
        }
        out.flush()
    }

    /// Format one row as a terminated record.
    pub fn format_record(&self, row: &Row) -> String {
        let mut record = String::new();
        for (i, field) in row.iter().enumerate() {
            if i > 0 {
                record.push(self.delimiter);
            }
            record.push_str(&self.escape(field));
        }
        record.push_str(RECORD_TERMINATOR);
        record
    }

    fn escape(&self, field: &str) -> String {
        if field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl Default for DelimitedWriter {
    fn default() -> Self {
        Self::new(',')
    }
}
