//! Run configuration.
//!
//! A run is described by an immutable [`HashConfig`]: where to read, where to
//! write, and the [`StreamOptions`] that shape each record.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Name of the appended hash column when none is given.
pub const DEFAULT_COLUMN_NAME: &str = "row_id";

/// Field delimiter of the input and output files.
///
/// Only comma and tab are accepted. The delimiter also separates cells when
/// a row's digest is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Delimiter {
    #[default]
    #[value(name = ",", alias = "comma")]
    Comma,
    #[value(name = "tab")]
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" => Ok(Delimiter::Comma),
            "tab" | "\t" => Ok(Delimiter::Tab),
            other => Err(format!("Unsupported delimiter '{other}' (expected ',' or 'tab')")),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => f.write_str(","),
            Delimiter::Tab => f.write_str("tab"),
        }
    }
}

/// Line ending written after each output record. CRLF is the conventional
/// CSV line ending and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
            LineTerminator::Crlf => csv::Terminator::CRLF,
        }
    }
}

/// Per-record behaviour of a hashing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    pub delimiter: Delimiter,
    /// Header cell appended for the digest column.
    pub column_name: String,
    /// Reject data records whose width differs from the header's.
    pub strict: bool,
    pub terminator: LineTerminator,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            column_name: DEFAULT_COLUMN_NAME.to_string(),
            strict: false,
            terminator: LineTerminator::default(),
        }
    }
}

/// Input and output paths plus the options applied between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: StreamOptions,
}

impl HashConfig {
    /// Config with default options (comma, `row_id`, tolerant, CRLF).
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: StreamOptions::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    pub fn with_column_name(mut self, name: impl Into<String>) -> Self {
        self.options.column_name = name.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.options.terminator = terminator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HashConfig::new("in.csv", "out.csv");
        assert_eq!(config.options.delimiter, Delimiter::Comma);
        assert_eq!(config.options.column_name, "row_id");
        assert!(!config.options.strict);
        assert_eq!(config.options.terminator, LineTerminator::Crlf);
    }

    #[test]
    fn test_builder_overrides() {
        let config = HashConfig::new("in.tsv", "out.tsv")
            .with_delimiter(Delimiter::Tab)
            .with_column_name("row_hash")
            .with_strict(true)
            .with_terminator(LineTerminator::Lf);
        assert_eq!(config.options.delimiter.as_char(), '\t');
        assert_eq!(config.options.column_name, "row_hash");
        assert!(config.options.strict);
        assert_eq!(config.options.terminator, LineTerminator::Lf);
    }

    #[test]
    fn test_tab_alias() {
        assert_eq!("tab".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!("\t".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!(Delimiter::Tab.as_byte(), b'\t');
    }

    #[test]
    fn test_comma_forms() {
        assert_eq!(",".parse::<Delimiter>().unwrap(), Delimiter::Comma);
        assert_eq!("comma".parse::<Delimiter>().unwrap(), Delimiter::Comma);
        assert_eq!(Delimiter::Comma.as_byte(), b',');
    }

    #[test]
    fn test_rejects_other_delimiters() {
        let err = ";".parse::<Delimiter>().unwrap_err();
        assert!(err.contains("';'"));
        assert!("|".parse::<Delimiter>().is_err());
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            <Delimiter as ValueEnum>::from_str(",", false).unwrap(),
            Delimiter::Comma
        );
        assert_eq!(
            <Delimiter as ValueEnum>::from_str("tab", false).unwrap(),
            Delimiter::Tab
        );
    }
}
