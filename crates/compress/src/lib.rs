//! Compression and tarball archiving with format detection.
//!
//! This crate wraps several compression libraries behind a unified
//! [`Compression`] enum, providing:
//!
//! - **Format detection** from magic bytes ([`Compression::from_magic_bytes`])
//! - **Streaming** via wrapped readers and finishable [`Encoder`]s
//! - **Directory archives** ([`Compression::pack`], [`Compression::unpack`])
//!   where the top-level tar entry is the archived directory itself
//!
//! Bzip2 and Gzip are always available. XZ is behind the `xz` feature flag.

mod archive;
mod construct;
pub mod error;
mod ops;
mod util;

pub use crate::ops::Encoder;

/// A supported compression format.
///
/// Variants gated behind feature flags (`xz`) are only available when the
/// corresponding feature is enabled. Defaults to [`None`](Self::None)
/// (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Bzip2 compression (.bz2)
    Bzip2,
    /// Gzip compression (.gz)
    Gzip,
    /// XZ/LZMA compression (.xz)
    #[cfg(feature = "xz")]
    Xz,
}

#[cfg(test)]
mod tests {
    use crate::Compression;

    #[test]
    fn compression_default() {
        assert_eq!(Compression::default(), Compression::None);
    }
}
