//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The tarball's checksum doesn't match the expected one.
    #[display("{} failed verification: expected md5 {expected}, got {actual}", file.display())]
    IntegrityFailure {
        file: PathBuf,
        expected: String,
        actual: String,
    },
    #[display("could not download {_0}")]
    Download(#[error(not(source))] String),
    #[display("source tarball not found: {}", _0.display())]
    MissingTarball(#[error(not(source))] PathBuf),
    #[display("could not extract {}", _0.display())]
    Extract(#[error(not(source))] PathBuf),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Download(_))
    }
}
