//! Error types for the `timeghost-catalog` crate.

use std::path::PathBuf;

/// Errors that can occur while loading or querying the event catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("failed to open catalog {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The CSV could not be read or a row did not match the header.
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    /// A `date` field could not be parsed.
    #[error("line {line}: unparseable date {value:?}")]
    InvalidDate {
        /// 1-based line of the record.
        line: u64,
        /// The raw field value.
        value: String,
    },

    /// A `description` field was empty.
    #[error("line {line}: empty description")]
    EmptyDescription {
        /// 1-based line of the record.
        line: u64,
    },

    /// The catalog has a header but no records.
    #[error("catalog contains no events")]
    Empty,

    /// No event has the requested slug.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
}
