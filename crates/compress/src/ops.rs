//! Compression Operations

use crate::Compression;
use bzip2::{Compression as BzCompression, read::BzDecoder, write::BzEncoder};
use flate2::{Compression as GzCompression, read::GzDecoder, write::GzEncoder};
use std::io::{self, Read, Write};
#[cfg(feature = "xz")]
use xz2::{read::XzDecoder, write::XzEncoder};

// Docset archives are built once and downloaded many times; spend the CPU.
const BZIP2_LEVEL: BzCompression = BzCompression::best();
const GZIP_LEVEL: GzCompression = GzCompression::best();
#[cfg(feature = "xz")]
const XZ_LEVEL: u32 = 9;

/// A compressing writer that must be explicitly [finished](Encoder::finish).
///
/// Unlike a boxed `dyn Write`, finishing returns the inner writer and
/// surfaces any error from flushing the compression trailer, which dropping
/// an encoder would silently discard.
pub enum Encoder<W: Write> {
    Plain(W),
    Bzip2(BzEncoder<W>),
    Gzip(GzEncoder<W>),
    #[cfg(feature = "xz")]
    Xz(XzEncoder<W>),
}
impl<W: Write> Encoder<W> {
    /// Write the compression trailer and return the inner writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            },
            Self::Bzip2(e) => e.finish(),
            Self::Gzip(e) => e.finish(),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.finish(),
        }
    }
}
impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Bzip2(e) => e.write(buf),
            Self::Gzip(e) => e.write(buf),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Bzip2(e) => e.flush(),
            Self::Gzip(e) => e.flush(),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.flush(),
        }
    }
}

impl Compression {
    /// Wrap a reader with the appropriate decompression layer.
    pub fn wrap_reader<'a, R: Read + 'a>(&self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Compression::None => Box::new(reader),
            Compression::Bzip2 => Box::new(BzDecoder::new(reader)),
            Compression::Gzip => Box::new(GzDecoder::new(reader)),
            #[cfg(feature = "xz")]
            Compression::Xz => Box::new(XzDecoder::new(reader)),
        }
    }

    /// Wrap a writer with the appropriate compression layer.
    pub fn encoder<W: Write>(&self, writer: W) -> Encoder<W> {
        match self {
            Compression::None => Encoder::Plain(writer),
            Compression::Bzip2 => Encoder::Bzip2(BzEncoder::new(writer, BZIP2_LEVEL)),
            Compression::Gzip => Encoder::Gzip(GzEncoder::new(writer, GZIP_LEVEL)),
            #[cfg(feature = "xz")]
            Compression::Xz => Encoder::Xz(XzEncoder::new(writer, XZ_LEVEL)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;
    use std::io::{Cursor, Read, Write};

    #[rstest]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    #[cfg_attr(feature = "xz", case(Compression::Xz))]
    fn test_invalid_compressed_data(#[case] format: Compression) {
        let mut output = Vec::new();
        let result = format.wrap_reader(Cursor::new(b"This is not compressed data")).read_to_end(&mut output);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    fn test_encoder_finish_returns_writer(#[case] format: Compression) {
        let mut encoder = format.encoder(Vec::new());
        encoder.write_all(b"Hello, world!").unwrap();
        let output = encoder.finish().unwrap();
        assert!(format.check_magic_bytes(&output));
        let mut decompressed = Vec::new();
        format.wrap_reader(Cursor::new(output)).read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, b"Hello, world!");
    }
}
