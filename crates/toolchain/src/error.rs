//! Toolchain Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A toolchain error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for toolchain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Neither the GNU-prefixed nor the plain executable is on the `PATH`.
    #[display("couldn't find '{_0}' executable")]
    ToolNotFound(#[error(not(source))] String),
    /// The executable was found but could not be started.
    #[display("couldn't start '{_0}'")]
    Spawn(#[error(not(source))] String),
    /// The tool ran and reported failure. A missing exit code means it was
    /// terminated by a signal.
    #[display("'{tool}' exited with {}", code.map_or("a signal".to_string(), |c| format!("code {c}")))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
    },
    /// The working directory could not be changed to (or restored from) the path.
    #[display("cannot change working directory to: {}", _0.display())]
    WorkingDir(#[error(not(source))] PathBuf),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A failed build step is deterministic: rerunning it won't help.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::ToolNotFound("tar".to_string()).to_string(), "couldn't find 'tar' executable");
        assert_eq!(
            ErrorKind::ToolFailed { tool: "make".to_string(), code: Some(2) }.to_string(),
            "'make' exited with code 2"
        );
        assert_eq!(
            ErrorKind::ToolFailed { tool: "cmake".to_string(), code: None }.to_string(),
            "'cmake' exited with a signal"
        );
    }
}
