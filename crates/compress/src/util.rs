use crate::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Compression {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl Compression {
    /// Returns the file extension for this compression format.
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Bzip2 => ".bz2",
            Compression::Gzip => ".gz",
            #[cfg(feature = "xz")]
            Compression::Xz => ".xz",
        }
    }

    /// Returns the file extension of a tarball compressed with this format,
    /// e.g. `.tar.gz`.
    #[inline]
    #[must_use]
    pub fn archive_extension(&self) -> String {
        format!(".tar{}", self.extension())
    }

    /// Returns the short name for configuration (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Bzip2 => "bzip2",
            Compression::Gzip => "gzip",
            #[cfg(feature = "xz")]
            Compression::Xz => "xz",
        }
    }

    /// Verify that `bytes` start with the expected magic bytes for this format.
    ///
    /// Useful for cross-checking a format detected from a file extension against
    /// actual file contents.
    #[must_use]
    pub fn check_magic_bytes(&self, bytes: &[u8]) -> bool {
        match Self::from_magic_bytes(bytes) {
            Compression::None => matches!(self, Compression::None),
            f => *self == f,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case(Compression::None, "", ".tar")]
    #[case(Compression::Bzip2, ".bz2", ".tar.bz2")]
    #[case(Compression::Gzip, ".gz", ".tar.gz")]
    #[cfg_attr(feature = "xz", case(Compression::Xz, ".xz", ".tar.xz"))]
    fn test_extensions(#[case] format: Compression, #[case] plain: &str, #[case] archive: &str) {
        assert_eq!(format.extension(), plain);
        assert_eq!(format.archive_extension(), archive);
    }

    #[test]
    fn test_check_magic_bytes() {
        assert!(Compression::Gzip.check_magic_bytes(&[0x1F, 0x8B, 0x08]));
        assert!(!Compression::Bzip2.check_magic_bytes(&[0x1F, 0x8B, 0x08]));
        assert!(Compression::None.check_magic_bytes(b"<!DOCTYPE html>"));
    }
}
