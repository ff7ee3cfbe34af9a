//! Aggregated blob table and its CSV serialization.
//!
//! The column schema is fixed up front, so a table with no rows is still a
//! valid table and serializes to a header-only CSV.

use crate::blob::{flatten, BlobCandidate, BlobRecord};
use crate::error::BatchError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Data columns in output order. The optional index column precedes them.
pub const COLUMNS: [&str; 4] = ["x", "y", "diameter", "filename"];

/// Concatenation of per-image tables in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlobTable {
    records: Vec<BlobRecord>,
}

impl BlobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten one image's candidates, tag them with `filename` and append.
    /// Returns the number of rows added.
    pub fn push_image(&mut self, filename: &str, candidates: &[BlobCandidate]) -> usize {
        let records = flatten(candidates).into_records(filename);
        let added = records.len();
        self.records.extend(records);
        added
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BlobRecord] {
        &self.records
    }

    pub fn rows_for<'a>(
        &'a self,
        filename: &'a str,
    ) -> impl Iterator<Item = &'a BlobRecord> + 'a {
        self.records.iter().filter(move |r| r.filename == filename)
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W, include_index: bool) -> io::Result<()> {
        if include_index {
            write!(writer, ",")?;
        }
        writeln!(writer, "{}", COLUMNS.join(","))?;

        for record in &self.records {
            if include_index {
                write!(writer, "{},", record.index)?;
            }
            writeln!(
                writer,
                "{},{},{},{}",
                record.x,
                record.y,
                record.diameter,
                escape_field(&record.filename)
            )?;
        }

        Ok(())
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn save_csv(&self, path: &Path, include_index: bool) -> Result<(), BatchError> {
        let write_err = |source| BatchError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer, include_index).map_err(write_err)?;
        writer.flush().map_err(write_err)
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
