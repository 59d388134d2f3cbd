//! Error types for csvt.
//!
//! Errors are layered the same way the crate is:
//!
//! - [`ManipulateError`] - structural failures of the grid manipulators
//!   (range parsing, range resolution, shape and key checks)
//! - [`CodecError`] - decoding or encoding a table
//! - [`AppError`] - top-level errors returned by [`crate::app::Application`]
//!
//! Conversion is automatic via `From`, so `?` works across layers.

use std::num::ParseIntError;

use thiserror::Error;

// =============================================================================
// Manipulation Errors
// =============================================================================

/// Coarse classification of a [`ManipulateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed range token.
    Parse,
    /// Range whose begin lies after its end once resolved.
    Range,
    /// Ragged grid under length checking.
    Shape,
    /// Unexpected, missing or duplicate key under strict checking.
    Key,
}

/// Errors raised by the transposer, mapper, unmapper, slicer and range parser.
#[derive(Debug, Error)]
pub enum ManipulateError {
    /// A range token is not an integer or `begin:end` pair.
    #[error("invalid range token '{token}': {source}")]
    Parse {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A range resolved to `begin > end`.
    #[error("invalid range: {begin}:{end}")]
    Range { begin: i64, end: i64 },

    /// A record does not have the expected number of columns.
    #[error("the number of the columns is invalid: row {row} has {found}, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An item carries a key that the header does not know.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// An item lacks a key that the header requires.
    #[error("entry is not found: {0}")]
    MissingEntry(String),

    /// A header names the same column twice.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

impl ManipulateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManipulateError::Parse { .. } => ErrorKind::Parse,
            ManipulateError::Range { .. } => ErrorKind::Range,
            ManipulateError::Shape { .. } => ErrorKind::Shape,
            ManipulateError::InvalidKey(_)
            | ManipulateError::MissingEntry(_)
            | ManipulateError::DuplicateKey(_) => ErrorKind::Key,
        }
    }
}

// =============================================================================
// Codec Errors
// =============================================================================

/// Errors while reading or writing a table.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Failed to read or write the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input, or a write failure inside the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON input, or a serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Input bytes could not be decoded to text.
    #[error("Failed to decode input as {0}")]
    Encoding(String),

    /// Well-formed input whose structure is not a grid or item list.
    #[error("Unexpected input shape at {location}: {message}")]
    UnexpectedShape { location: String, message: String },
}

// =============================================================================
// Application Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::app::Application::run`] and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Manipulation failed.
    #[error("{0}")]
    Manipulate(#[from] ManipulateError),

    /// Decoding or encoding failed.
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// Invalid option or option combination.
    #[error("{0}")]
    Config(String),

    /// Opening or persisting a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for manipulation operations.
pub type ManipulateResult<T> = Result<T, ManipulateError>;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for application runs.
pub type AppResult<T> = Result<T, AppError>;
