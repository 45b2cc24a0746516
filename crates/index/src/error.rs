//! Index Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An index error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    #[display("could not create search index schema")]
    Schema,
    #[display("search index location is not usable: {}", _0.display())]
    InvalidLocation(#[error(not(source))] PathBuf),
    /// A stored row could not be converted back into an entry.
    #[display("invalid index data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
    #[display("unknown entry type: {_0}")]
    UnknownEntryType(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
