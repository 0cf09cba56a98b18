//! Error taxonomy for parsing, storing, and loading option records.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Why a text-config line was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The line contains none of the recognised `key=` markers.
    #[error("unrecognised option `{0}`")]
    UnrecognisedKey(String),
    /// An enumerated option was given a value outside its vocabulary.
    #[error("`{value}` is not a valid value for `{key}`")]
    InvalidValue {
        /// Option name without the trailing `=`.
        key: &'static str,
        /// The offending value text.
        value: String,
    },
}

/// Errors produced while reading or writing a [`TaggerOptions`](crate::TaggerOptions) record.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("syntax error on line {line}: {kind}")]
    Syntax { line: usize, kind: SyntaxErrorKind },
    #[error("value `{value}` for `{key}` on line {line} is out of range")]
    NumericalRange {
        line: usize,
        key: &'static str,
        value: String,
    },
    #[error("failed to read option record: {0}")]
    ReadFailed(#[source] io::Error),
    #[error("failed to write option record: {0}")]
    WriteFailed(#[source] io::Error),
    #[error("corrupt option record: {names} field names but {values} field values")]
    BadBinary { names: usize, values: usize },
    #[error("failed to access options file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OptionsError {
    /// Line number attached to text-config errors, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match *self {
            Self::Syntax { line, .. } | Self::NumericalRange { line, .. } => Some(line),
            _ => None,
        }
    }
}
