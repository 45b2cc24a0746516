//! Directory Archives
//!
//! Tarballs are rooted at the archived directory: packing `out/LLVM_5.docset`
//! produces entries `LLVM_5.docset/...`, so extracting the archive anywhere
//! recreates the bundle directory itself.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek};
use std::path::Path;
use tar::{Archive, Builder, HeaderMode};
use tracing::instrument;

impl Compression {
    /// Archive the directory `dir` into the file `output`, returning the size
    /// of the written archive in bytes.
    ///
    /// Returns [`ErrorKind::MissingSource`] if `dir` is not an existing
    /// directory; nothing is written in that case.
    #[instrument(skip_all, fields(format = %self, dir = %dir.as_ref().display(), size))]
    pub fn pack(&self, dir: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
        let dir = dir.as_ref();
        let output = output.as_ref();
        if !dir.is_dir() {
            exn::bail!(ErrorKind::MissingSource(dir.to_path_buf()));
        }
        let name = dir.file_name().ok_or_raise(|| ErrorKind::MissingSource(dir.to_path_buf()))?;

        let file = File::create(output).or_raise(|| ErrorKind::Io)?;
        let mut builder = Builder::new(self.encoder(BufWriter::new(file)));
        // Identical bundles should produce identical archives.
        builder.mode(HeaderMode::Deterministic);
        builder.follow_symlinks(false);
        builder.append_dir_all(name, dir).or_raise(|| ErrorKind::Io)?;
        let encoder = builder.into_inner().or_raise(|| ErrorKind::Io)?;
        let writer = encoder.finish().or_raise(|| ErrorKind::Io)?;
        writer.into_inner().map_err(|e| e.into_error()).or_raise(|| ErrorKind::Io)?;

        let size = output.metadata().or_raise(|| ErrorKind::Io)?.len();
        tracing::Span::current().record("size", size);
        Ok(size)
    }

    /// Extract the archive at `archive` into the directory `dest`.
    ///
    /// The archive must start with this format's magic bytes; an archive
    /// compressed with another format is [`ErrorKind::InvalidData`].
    #[instrument(skip_all, fields(format = %self, archive = %archive.as_ref().display()))]
    pub fn unpack(&self, archive: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
        let archive = archive.as_ref();
        if !archive.is_file() {
            exn::bail!(ErrorKind::MissingSource(archive.to_path_buf()));
        }
        let mut file = File::open(archive).or_raise(|| ErrorKind::Io)?;
        let mut magic = [0u8; 6];
        let read = file.read(&mut magic).or_raise(|| ErrorKind::Io)?;
        if !self.check_magic_bytes(&magic[..read]) {
            exn::bail!(ErrorKind::InvalidData);
        }
        file.rewind().or_raise(|| ErrorKind::Io)?;
        let mut tarball = Archive::new(self.wrap_reader(BufReader::new(file)));
        tarball.unpack(dest.as_ref()).or_raise(|| ErrorKind::InvalidData)
    }
}
