//! Line-oriented record reader.
//!
//! The `csv` reader drops blank lines. Here a blank physical line is a
//! record with no fields, so it is hashed and written like any other row.
//! Physical lines are gathered until no quoted field is left open, then the
//! gathered bytes are parsed as one record.

use crate::config::Delimiter;
use crate::error::Result;
use csv::{ReaderBuilder, StringRecord};
use std::io::BufRead;

/// Reads one logical record at a time from buffered input.
pub struct RecordReader<R> {
    input: R,
    builder: ReaderBuilder,
    delimiter: u8,
    chunk: Vec<u8>,
    /// Physical lines consumed so far.
    lines: u64,
    /// First physical line of the last record returned.
    record_line: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R, delimiter: Delimiter) -> Self {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .flexible(true);
        Self {
            input,
            builder,
            delimiter: delimiter.as_byte(),
            chunk: Vec::new(),
            lines: 0,
            record_line: 0,
        }
    }

    /// 1-based line on which the last returned record started.
    pub fn line(&self) -> u64 {
        self.record_line
    }

    /// Read the next record into `record`. Returns `false` at end of input.
    pub fn read_record(&mut self, record: &mut StringRecord) -> Result<bool> {
        self.chunk.clear();
        let mut quotes = QuoteState::default();

        loop {
            let start = self.chunk.len();
            let read = self
                .input
                .read_until(b'\n', &mut self.chunk)
                .map_err(csv::Error::from)?;
            if read == 0 {
                break;
            }
            self.lines += 1;
            if start == 0 {
                self.record_line = self.lines;
            }
            quotes.scan(&self.chunk[start..], self.delimiter);
            if !quotes.in_quotes {
                break;
            }
        }

        if self.chunk.is_empty() {
            return Ok(false);
        }
        if is_blank_line(&self.chunk) {
            *record = StringRecord::new();
            return Ok(true);
        }

        let mut parser = self.builder.from_reader(self.chunk.as_slice());
        if !parser.read_record(record)? {
            *record = StringRecord::new();
        }
        Ok(true)
    }
}

fn is_blank_line(chunk: &[u8]) -> bool {
    chunk == b"\n" || chunk == b"\r\n" || chunk == b"\r"
}

/// Tracks whether a quoted field is open across physical lines.
#[derive(Default)]
struct QuoteState {
    in_quotes: bool,
    mid_field: bool,
}

impl QuoteState {
    fn scan(&mut self, bytes: &[u8], delimiter: u8) {
        let mut iter = bytes.iter().peekable();
        while let Some(&b) = iter.next() {
            if self.in_quotes {
                if b == b'"' {
                    if iter.peek() == Some(&&b'"') {
                        iter.next();
                    } else {
                        self.in_quotes = false;
                    }
                }
            } else if b == delimiter || b == b'\n' || b == b'\r' {
                self.mid_field = false;
            } else if b == b'"' && !self.mid_field {
                self.in_quotes = true;
                self.mid_field = true;
            } else {
                self.mid_field = true;
            }
        }
    }
}
