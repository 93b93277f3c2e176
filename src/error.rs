//! Error type for row hashing runs.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while hashing a delimited file.
#[derive(Debug, Error)]
pub enum RowHashError {
    /// The input path does not exist or cannot be opened for reading.
    #[error("File not found: {}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input holds no bytes, so there is no header. `path` is unset
    /// when hashing a stream.
    #[error("Empty input: {} has no header record", input_label(path.as_deref()))]
    EmptyInput { path: Option<PathBuf> },

    /// A data record's width differs from the header's (strict mode only).
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Input and output resolve to the same file.
    #[error("output '{}' is the input file", path.display())]
    SameFile { path: PathBuf },

    /// A file or directory operation on `path` failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed input or a failed read or write while streaming records.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn input_label(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "input".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RowHashError>;
