//! Streaming row-hash executor.
//!
//! Records are read one at a time, pushed through the stage chain, and
//! written before the next record is read. Only the header and the record
//! in flight are held in memory, whatever the size of the input.

use crate::config::{HashConfig, StreamOptions};
use crate::error::{Result, RowHashError};
use crate::record_reader::RecordReader;
use crate::record_stage::{RecordStage, stages_for};
use csv::{QuoteStyle, StringRecord, Writer, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Counts reported by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSummary {
    /// Data records hashed (the header is not counted).
    pub rows: u64,
    /// Width of the input header, before the hash column is added.
    pub columns: usize,
}

fn csv_writer<W: Write>(output: W, options: &StreamOptions) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .terminator(options.terminator.to_csv())
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(output)
}

fn read_header<R: BufRead>(
    reader: &mut RecordReader<R>,
    path: Option<&Path>,
) -> Result<StringRecord> {
    let mut header = StringRecord::new();
    if !reader.read_record(&mut header)? {
        return Err(RowHashError::EmptyInput {
            path: path.map(Path::to_path_buf),
        });
    }
    Ok(header)
}

/// Push the header and then every remaining record through the stages.
fn run<R: BufRead, W: Write>(
    mut reader: RecordReader<R>,
    mut header: StringRecord,
    mut writer: Writer<W>,
    stages: &mut [Box<dyn RecordStage>],
) -> Result<HashSummary> {
    let columns = header.len();
    for stage in stages.iter_mut() {
        stage.header(&mut header)?;
    }
    writer.write_record(&header)?;

    let mut record = StringRecord::new();
    let mut rows: u64 = 0;
    while reader.read_record(&mut record)? {
        let line = reader.line();
        for stage in stages.iter_mut() {
            stage.process(line, &mut record)?;
        }
        writer.write_record(&record)?;
        rows += 1;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(HashSummary { rows, columns })
}

/// Hash every data record of `input` and write the result to `output`.
///
/// The first record is the header; it gets the configured column name
/// appended. Every later record, blank lines included, gets its digest
/// appended. Input with no bytes fails with [`RowHashError::EmptyInput`]
/// before anything is written.
pub fn hash_stream<R: Read, W: Write>(
    input: R,
    output: W,
    options: &StreamOptions,
) -> Result<HashSummary> {
    let mut reader = RecordReader::new(BufReader::new(input), options.delimiter);
    let header = read_header(&mut reader, None)?;
    let writer = csv_writer(output, options);
    run(reader, header, writer, &mut stages_for(options))
}

fn same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Hash the file at `config.input` into `config.output`.
///
/// The input is opened and its header read before the output is created,
/// so a missing or empty input leaves no output file behind, and an output
/// that is the input itself is refused untouched. The output's parent
/// directory is created when missing. A failure after the header has been
/// written leaves the partial output in place.
pub fn hash_file(config: &HashConfig) -> Result<HashSummary> {
    let options = &config.options;
    debug!(
        input = %config.input.display(),
        output = %config.output.display(),
        delimiter = %options.delimiter,
        column = %options.column_name,
        strict = options.strict,
        "starting row hash"
    );

    let file = File::open(&config.input).map_err(|source| RowHashError::InputNotFound {
        path: config.input.clone(),
        source,
    })?;
    if same_file(&config.input, &config.output) {
        return Err(RowHashError::SameFile {
            path: config.output.clone(),
        });
    }

    let mut reader = RecordReader::new(BufReader::new(file), options.delimiter);
    let header = read_header(&mut reader, Some(&config.input))?;

    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| RowHashError::Io { path, source }
    };
    if let Some(parent) = config.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let output = File::create(&config.output).map_err(io_error(&config.output))?;

    let summary = run(
        reader,
        header,
        csv_writer(output, options),
        &mut stages_for(options),
    )?;
    info!(
        rows = summary.rows,
        columns = summary.columns,
        output = %config.output.display(),
        "hashed file written"
    );
    Ok(summary)
}
