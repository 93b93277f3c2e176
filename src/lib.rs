//! # row-hasher
//!
//! Appends an MD5 hash of each row to a CSV or TSV file.
//!
//! Rows are streamed one at a time, so files larger than memory are handled
//! in a single pass. The first record is treated as the header and gets the
//! hash column's name; every later record, blank lines included, gets the
//! digest of its cells joined by the file's delimiter.
//!
//! ## Example
//!
//! ```
//! use row_hasher::{StreamOptions, hash_stream};
//!
//! let input = "name,age\nalice,30\n";
//! let mut output = Vec::new();
//! let summary = hash_stream(input.as_bytes(), &mut output, &StreamOptions::default()).unwrap();
//!
//! assert_eq!(summary.rows, 1);
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "name,age,row_id\r\nalice,30,1674d082249fd065f89e0426e5155da8\r\n"
//! );
//! ```

pub mod config;
pub mod digest;
pub mod error;
pub mod executor;
pub mod record_reader;
pub mod record_stage;

pub use config::{DEFAULT_COLUMN_NAME, Delimiter, HashConfig, LineTerminator, StreamOptions};
pub use digest::{DIGEST_LEN, hash_row};
pub use error::{Result, RowHashError};
pub use executor::{HashSummary, hash_file, hash_stream};
pub use record_reader::RecordReader;
pub use record_stage::{HashStage, RecordStage, ShapeStage, stages_for};
