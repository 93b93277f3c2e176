//! Record stage trait and implementations.
//!
//! A `RecordStage` rewrites one record in place. The executor passes the
//! header through every stage once, then each data record in turn, so a
//! stage sees the header before any data record.

use crate::config::StreamOptions;
use crate::digest::hash_row;
use crate::error::{Result, RowHashError};
use csv::StringRecord;
use tracing::debug;

/// A stage that transforms records one at a time.
pub trait RecordStage {
    /// Adjust the header record. Called once, before any data record.
    fn header(&mut self, _header: &mut StringRecord) -> Result<()> {
        Ok(())
    }

    /// Transform a data record read from input line `line`.
    fn process(&mut self, line: u64, record: &mut StringRecord) -> Result<()>;

    /// The display name of this stage.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Stage implementations
// ---------------------------------------------------------------------------

/// SHAPE - compares each record's width with the header's.
///
/// Strict mode fails on the first mismatch; otherwise mismatches are logged
/// and the record passes through untouched.
pub struct ShapeStage {
    expected: usize,
    strict: bool,
}

impl ShapeStage {
    pub fn new(strict: bool) -> Self {
        Self {
            expected: 0,
            strict,
        }
    }
}

impl RecordStage for ShapeStage {
    fn header(&mut self, header: &mut StringRecord) -> Result<()> {
        self.expected = header.len();
        Ok(())
    }

    fn process(&mut self, line: u64, record: &mut StringRecord) -> Result<()> {
        let found = record.len();
        if found == self.expected {
            return Ok(());
        }
        if self.strict {
            return Err(RowHashError::RaggedRow {
                line,
                expected: self.expected,
                found,
            });
        }
        debug!(line, expected = self.expected, found, "ragged row passed through");
        Ok(())
    }

    fn name(&self) -> &str {
        "SHAPE"
    }
}

/// HASH - appends the row digest as a new last cell.
pub struct HashStage {
    delimiter: char,
    column_name: String,
}

impl HashStage {
    pub fn new(delimiter: char, column_name: impl Into<String>) -> Self {
        Self {
            delimiter,
            column_name: column_name.into(),
        }
    }
}

impl RecordStage for HashStage {
    fn header(&mut self, header: &mut StringRecord) -> Result<()> {
        header.push_field(&self.column_name);
        Ok(())
    }

    fn process(&mut self, _line: u64, record: &mut StringRecord) -> Result<()> {
        let digest = hash_row(record.iter(), self.delimiter);
        record.push_field(&digest);
        Ok(())
    }

    fn name(&self) -> &str {
        "HASH"
    }
}

/// Build the stage chain for a run. The shape check must see records before
/// the digest cell is appended.
pub fn stages_for(options: &StreamOptions) -> Vec<Box<dyn RecordStage>> {
    vec![
        Box::new(ShapeStage::new(options.strict)),
        Box::new(HashStage::new(
            options.delimiter.as_char(),
            options.column_name.clone(),
        )),
    ]
}
