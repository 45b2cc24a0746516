//! Harvest Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A harvest error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The index page is missing from the generated documentation.
    #[display("index page not found: {}", _0.display())]
    PageNotFound(#[error(not(source))] PathBuf),
    /// The index page exists but could not be read.
    #[display("index page unreadable: {}", _0.display())]
    Unreadable(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Generated HTML is a precondition; it does not appear on its own.
        false
    }
}
