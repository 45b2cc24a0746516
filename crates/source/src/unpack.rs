use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::instrument;

/// Extract a release tarball into a freshly recreated `dest`.
///
/// Release tarballs contain a single `<stem>-<version>.src/` directory; it is
/// stripped so that its contents land directly in `dest`.
#[instrument(skip_all, fields(tarball = %tarball.as_ref().display(), dest = %dest.as_ref().display()))]
pub fn extract(tarball: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let tarball = tarball.as_ref();
    let dest = dest.as_ref();
    if !tarball.is_file() {
        exn::bail!(ErrorKind::MissingTarball(tarball.to_path_buf()));
    }
    match fs::remove_dir_all(dest) {
        Ok(()) => tracing::debug!("Removed previous sources"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {},
        Err(e) => return Err(e).or_raise(|| ErrorKind::Io),
    }
    fs::create_dir_all(dest).or_raise(|| ErrorKind::Io)?;
    docsets_toolchain::untar(tarball, dest, 1).or_raise(|| ErrorKind::Extract(tarball.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_tarball() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("llvm-5.0.1");
        let err = extract(dir.path().join("llvm-5.0.1.src.tar.xz"), &dest).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingTarball(_)));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_replaces_previous_sources() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("cfe-5.0.1.src/docs")).unwrap();
        fs::write(root.join("cfe-5.0.1.src/docs/UsersManual.rst"), "Users Manual").unwrap();
        let tar = docsets_toolchain::Tool::discover("tar").unwrap();
        let mut command = tar.command();
        command.arg("-cf").arg(root.join("cfe.tar")).arg("-C").arg(root).arg("cfe-5.0.1.src");
        tar.execute(&mut command).unwrap();

        let dest = root.join("llvm-5.0.1/tools/clang");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.txt"), "stale").unwrap();

        extract(root.join("cfe.tar"), &dest).unwrap();
        assert!(dest.join("docs/UsersManual.rst").is_file());
        assert!(!dest.join("stale.txt").exists());
    }
}
