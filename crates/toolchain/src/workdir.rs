//! Scoped changes of the process working directory.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::env;
use std::path::{Path, PathBuf};

/// Guard that changes the working directory and changes it back on drop.
///
/// The previous directory is restored on every exit path, including early
/// returns through `?` and unwinding panics. The working directory is
/// process-wide state: keep guards strictly nested and don't hold one across
/// threads.
#[must_use = "the previous working directory is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct WorkingDir {
    previous: PathBuf,
}
impl WorkingDir {
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let previous = env::current_dir().or_raise(|| ErrorKind::Io)?;
        env::set_current_dir(path).or_raise(|| ErrorKind::WorkingDir(path.to_path_buf()))?;
        tracing::debug!(from = %previous.display(), to = %path.display(), "Entered working directory");
        Ok(Self { previous })
    }

    /// Run `f` with `path` as the working directory.
    pub fn scope<T>(path: impl AsRef<Path>, f: impl FnOnce() -> T) -> Result<T> {
        let _guard = Self::enter(path)?;
        Ok(f())
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}
impl Drop for WorkingDir {
    fn drop(&mut self) {
        match env::set_current_dir(&self.previous) {
            Ok(()) => tracing::debug!(to = %self.previous.display(), "Restored working directory"),
            Err(e) => tracing::error!(error = %e, to = %self.previous.display(), "Could not restore working directory"),
        }
    }
}
