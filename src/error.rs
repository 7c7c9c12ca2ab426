use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError – argument resolution failures
// ---------------------------------------------------------------------------

/// Why the command line could not be turned into a [`Config`](crate::config::Config).
///
/// Every variant, including [`ConfigError::HelpRequested`], ends the program with
/// the usage text and exit status 1.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("help requested")]
    HelpRequested,
    #[error("missing input file (-i)")]
    MissingInput,
    #[error("missing start column (-s)")]
    MissingStart,
    #[error("missing end column (-e)")]
    MissingEnd,
    #[error("start column must be >= 0, got {0}")]
    NegativeStart(i64),
    #[error("end column {end} is before start column {start}")]
    EndBeforeStart { start: i64, end: i64 },
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// SeedError – I/O failures while selecting seeds
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot open input file {}: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },
    #[error("cannot create output file {}: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },
    #[error("reading input: {0}")]
    Read(#[source] io::Error),
    #[error("writing seed list: {0}")]
    Write(#[source] io::Error),
    #[error("writing report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SeedError {
    /// Setup failures happen before any row is read.
    pub fn is_setup(&self) -> bool {
        matches!(self, SeedError::OpenInput { .. } | SeedError::CreateOutput { .. })
    }
}
