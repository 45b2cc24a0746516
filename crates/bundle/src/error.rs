//! Bundle Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A bundle error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for bundle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The generated HTML tree to place inside the bundle does not exist.
    #[display("generated HTML not found: {}", _0.display())]
    MissingHtml(#[error(not(source))] PathBuf),
    #[display("icon not found: {}", _0.display())]
    MissingIcon(#[error(not(source))] PathBuf),
    /// A finished bundle was expected at the path (for archiving or patching).
    #[display("docset bundle not found: {}", _0.display())]
    MissingBundle(#[error(not(source))] PathBuf),
    /// A file that should be patched in place does not exist.
    #[display("file to patch not found: {}", _0.display())]
    MissingFile(#[error(not(source))] PathBuf),
    #[display("unknown package: {_0}")]
    UnknownPackage(#[error(not(source))] String),
    #[display("asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] &'static str),
    #[display("template error")]
    Template,
    #[display("search index error")]
    Index,
    #[display("could not harvest links from index page: {_0}")]
    Harvest(#[error(not(source))] String),
    #[display("compression error")]
    Compression,
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Everything here is a missing precondition or a local I/O failure.
        matches!(self, Self::Io)
    }
}
