//! Error types for the rawcopy core library

use thiserror::Error;

/// Main error type for copy operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transfer parameters are unusable (e.g. zero block size)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Source or destination could not be opened
    #[error("Could not open {path}: {source}")]
    Open {
        /// Path that failed to open
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Read error while copying
    #[error("Error reading from source: {0}")]
    Read(#[source] std::io::Error),

    /// Write error while copying
    #[error("Error writing to destination: {0}")]
    Write(#[source] std::io::Error),

    /// A write stored fewer bytes than requested
    #[error("Partial write: expected {expected} bytes, wrote {actual} bytes")]
    PartialWrite {
        /// Bytes the block held
        expected: usize,
        /// Bytes actually written
        actual: usize,
    },
}

impl Error {
    /// True for mid-copy write failures, including short writes.
    #[must_use]
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Error::Write(_) | Error::PartialWrite { .. })
    }
}

/// Result type alias using the rawcopy error type
pub type Result<T> = std::result::Result<T, Error>;
