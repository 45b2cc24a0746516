//! Top-level Error Types
//!
//! Each pipeline step wraps the error tree of the crate that failed, so the
//! printed tree reads from the step down to the root cause.

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline steps.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not remove previous build output")]
    Clean,
    #[display("could not fetch sources of {_0}")]
    Fetch(#[error(not(source))] &'static str),
    #[display("could not extract sources of {_0}")]
    Extract(#[error(not(source))] &'static str),
    #[display("could not generate documentation of {_0}")]
    Generate(#[error(not(source))] &'static str),
    #[display("could not build docset of {_0}")]
    Docset(#[error(not(source))] &'static str),
    #[display("could not build API docset of {_0}")]
    Api(#[error(not(source))] &'static str),
    #[display("could not archive {_0}")]
    Compress(#[error(not(source))] &'static str),
    #[display("unknown package")]
    Package,
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
