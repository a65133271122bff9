use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while reading or loading `.env` files.
#[derive(Debug, Error)]
pub enum Error {
    /// The path given for an env file was empty or whitespace.
    #[error("the file path cannot be empty or whitespace")]
    InvalidPath,

    /// An explicitly listed env file does not exist.
    #[error("a file with the provided path {} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// Probing ancestor directories did not find the default file.
    #[error(
        "could not find '{file_name}' after searching {levels} directory level(s) upwards; searched: {}",
        display_paths(searched)
    )]
    ProbeNotFound {
        file_name: String,
        levels: usize,
        searched: Vec<PathBuf>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A value in the input could not be parsed. Never suppressed by
/// `ignore_errors`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse environment variable: {key}. {kind}")]
pub struct ParseError {
    pub key: String,
    pub line: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(key: &str, line: u32, kind: ParseErrorKind) -> Self {
        Self {
            key: key.to_owned(),
            line,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Missing closing quote.")]
    MissingClosingQuote,
}

/// Errors returned by [`EnvReader`](crate::EnvReader) lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
    #[error("environment variable {key} is not set")]
    Missing { key: String },

    #[error("environment variable {key} is not a valid {ty}: {value:?}")]
    Invalid {
        key: String,
        ty: &'static str,
        value: String,
    },
}
