//! CLI tool to append an MD5 row hash to a CSV or TSV file.
//!
//! Usage:
//!   row-hash <input.csv> <output.csv>
//!   row-hash <input.tsv> <output.tsv> -d tab
//!   row-hash <input.csv> <output.csv> --column-name row_hash

use clap::Parser;
use row_hasher::{DEFAULT_COLUMN_NAME, Delimiter, HashConfig, LineTerminator, hash_file};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Append an MD5 row hash to each row of a CSV or TSV file.
///
/// Each hash is computed from the row's cells joined by the file's
/// delimiter. Rows are streamed, so large files are fine.
#[derive(Parser)]
#[command(name = "row-hash", version)]
struct Cli {
    /// Path to the input CSV/TSV file
    input: PathBuf,

    /// Path to the output file
    output: PathBuf,

    /// Column delimiter: ',' (default) or 'tab' for TSV
    #[arg(short, long, value_enum, default_value_t = Delimiter::Comma)]
    delimiter: Delimiter,

    /// Name of the hash column
    #[arg(long, default_value = DEFAULT_COLUMN_NAME)]
    column_name: String,

    /// Fail on rows whose field count differs from the header's
    #[arg(long)]
    strict: bool,

    /// End output lines with LF instead of CRLF
    #[arg(long)]
    lf: bool,

    /// Log settings and row counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> HashConfig {
        let terminator = if self.lf {
            LineTerminator::Lf
        } else {
            LineTerminator::Crlf
        };
        HashConfig::new(&self.input, &self.output)
            .with_delimiter(self.delimiter)
            .with_column_name(self.column_name.as_str())
            .with_strict(self.strict)
            .with_terminator(terminator)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match hash_file(&cli.config()) {
        Ok(_) => println!("Hashed file created at {}", cli.output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
