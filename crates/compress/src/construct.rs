use crate::Compression;
use crate::error::{Error, ErrorKind};
use std::str::FromStr;

const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
#[cfg(feature = "xz")]
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];

impl FromStr for Compression {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "tar" => Ok(Compression::None),
            "bz2" | "bzip2" => Ok(Compression::Bzip2),
            "gz" | "gzip" | "gztar" => Ok(Compression::Gzip),
            #[cfg(feature = "xz")]
            "xz" | "lzma" => Ok(Compression::Xz),
            #[cfg(not(feature = "xz"))]
            "xz" | "lzma" => exn::bail!(ErrorKind::DisabledFormat(s.to_string())),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(s.to_string())),
        }
    }
}
impl Compression {
    /// Detect compression format from magic bytes.
    ///
    /// Returns `None` variant if no magic bytes match or if the input
    /// is too short to detect any format.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&BZIP2_MAGIC) {
            return Compression::Bzip2;
        }
        if bytes.starts_with(&GZIP_MAGIC) {
            return Compression::Gzip;
        }
        #[cfg(feature = "xz")]
        if bytes.starts_with(&XZ_MAGIC) {
            return Compression::Xz;
        }
        Compression::None
    }
}
