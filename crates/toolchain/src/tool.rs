use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::instrument;

/// An external executable located on the `PATH`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tool {
    name: String,
    path: PathBuf,
}
impl Tool {
    /// Locate an executable by name.
    ///
    /// The GNU variant (`g<name>`, e.g. `gtar` or `gmake`) is preferred over
    /// the plain name, since BSD userlands ship incompatible tools under the
    /// plain names.
    #[instrument(level = "debug")]
    pub fn discover(name: &str) -> Result<Self> {
        for candidate in [format!("g{name}"), name.to_string()] {
            if let Ok(path) = which::which(&candidate) {
                tracing::debug!(path = %path.display(), "Discovered executable");
                return Ok(Self { name: name.to_string(), path });
            }
        }
        exn::bail!(ErrorKind::ToolNotFound(name.to_string()));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepare a command running this tool.
    pub fn command(&self) -> Command {
        Command::new(&self.path)
    }

    /// Run the tool with the given arguments and wait for it to finish.
    ///
    /// Output is inherited from this process. A non-zero exit status is an
    /// error; nothing is retried.
    pub fn run<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command();
        command.args(args);
        self.execute(&mut command)
    }

    /// Run a prepared command (see [`command`](Self::command)) and wait for it
    /// to finish.
    pub fn execute(&self, command: &mut Command) -> Result<()> {
        let line = std::iter::once(self.name.clone())
            .chain(command.get_args().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(command = %line, "Running external tool");
        let status = command.status().or_raise(|| ErrorKind::Spawn(self.name.clone()))?;
        if !status.success() {
            exn::bail!(ErrorKind::ToolFailed { tool: self.name.clone(), code: status.code() });
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_discover_missing_tool() {
        let err = Tool::discover("definitely-not-an-installed-tool").unwrap_err();
        assert!(matches!(&*err, ErrorKind::ToolNotFound(name) if name == "definitely-not-an-installed-tool"));
    }

    #[test]
    fn test_run_success() {
        let tool = Tool::discover("true").unwrap();
        assert_eq!(tool.name(), "true");
        assert!(tool.path().is_absolute());
        tool.run(["--ignored"]).unwrap();
    }

    #[test]
    fn test_run_failure_is_fatal() {
        let tool = Tool::discover("false").unwrap();
        let err = tool.run::<_, &str>([]).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ToolFailed { tool, code: Some(1) } if tool == "false"));
    }
}
