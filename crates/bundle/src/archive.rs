use crate::error::{ErrorKind, Result};
use docsets_compress::Compression;
use exn::{OptionExt, ResultExt};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Archive a finished bundle next to itself, e.g. `LLVM_5.docset` becomes
/// `LLVM_5.docset.tar.gz`. The archive has the bundle directory as its
/// single top-level entry.
#[instrument(skip(bundle), fields(bundle = %bundle.as_ref().display()))]
pub fn archive(bundle: impl AsRef<Path>, compression: Compression) -> Result<PathBuf> {
    let bundle = bundle.as_ref();
    if !bundle.is_dir() {
        exn::bail!(ErrorKind::MissingBundle(bundle.to_path_buf()));
    }
    let name = bundle.file_name().ok_or_raise(|| ErrorKind::MissingBundle(bundle.to_path_buf()))?;
    let output = bundle.with_file_name(format!("{}{}", name.to_string_lossy(), compression.archive_extension()));
    let size = compression.pack(bundle, &output).or_raise(|| ErrorKind::Compression)?;
    tracing::info!(archive = %output.display(), size, "Archived docset");
    Ok(output)
}
