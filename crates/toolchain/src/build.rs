//! Wrappers around the build tools that generate and unpack documentation.

use crate::error::{ErrorKind, Result};
use crate::{Tool, WorkingDir};
use exn::{OptionExt, ResultExt};
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::instrument;

/// Run `make` on the given makefile.
///
/// Equivalent to `make -C <dir> -f <file> [target] [BUILDDIR=<abs build_dir>]`.
/// The build directory is created first if it doesn't exist.
#[instrument(skip_all, fields(makefile = %makefile.as_ref().display(), goal = target))]
pub fn make(makefile: impl AsRef<Path>, target: Option<&str>, build_dir: Option<&Path>) -> Result<()> {
    let makefile = makefile.as_ref();
    let make = Tool::discover("make")?;
    let dir = makefile.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file = makefile.file_name().ok_or_raise(|| ErrorKind::Spawn(make.name().to_string()))?;

    let mut args: Vec<OsString> = vec!["-C".into(), dir.into(), "-f".into(), file.into()];
    if let Some(target) = target {
        args.push(target.into());
    }
    if let Some(build_dir) = build_dir {
        fs::create_dir_all(build_dir).or_raise(|| ErrorKind::Io)?;
        let absolute = std::path::absolute(build_dir).or_raise(|| ErrorKind::Io)?;
        let mut assignment = OsString::from("BUILDDIR=");
        assignment.push(absolute);
        args.push(assignment);
    }
    make.run(args)
}

/// Configure a CMake project from inside `build_dir` (created if missing).
///
/// Each define is passed as `-D<define>`; `source_dir` should be absolute
/// since it is resolved from within the build directory.
#[instrument(skip_all, fields(source = %source_dir.as_ref().display(), build = %build_dir.as_ref().display()))]
pub fn cmake(source_dir: impl AsRef<Path>, build_dir: impl AsRef<Path>, defines: &[&str]) -> Result<()> {
    let cmake = Tool::discover("cmake")?;
    fs::create_dir_all(build_dir.as_ref()).or_raise(|| ErrorKind::Io)?;
    let mut args: Vec<OsString> = defines.iter().map(|d| OsString::from(format!("-D{d}"))).collect();
    args.push(source_dir.as_ref().into());
    let _cwd = WorkingDir::enter(build_dir)?;
    cmake.run(args)
}

/// Extract a tarball into `dest`, dropping the first `strip` path components
/// of every entry. `dest` must exist.
#[instrument(skip_all, fields(tarball = %tarball.as_ref().display(), dest = %dest.as_ref().display()))]
pub fn untar(tarball: impl AsRef<Path>, dest: impl AsRef<Path>, strip: usize) -> Result<()> {
    let tar = Tool::discover("tar")?;
    let mut args: Vec<OsString> =
        vec!["-xf".into(), tarball.as_ref().into(), "-C".into(), dest.as_ref().into()];
    if strip > 0 {
        args.push(format!("--strip-components={strip}").into());
    }
    tar.run(args)
}
