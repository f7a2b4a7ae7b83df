//! Running `go`, `hg` and `bzr`.
//!
//! Commands run synchronously with no timeout; a hung VCS command blocks
//! the save that started it.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{bail, Context, Result};

/// A command line to run, built up with chained calls.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)));
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Run with captured output; a non-zero exit is an error carrying stderr.
    pub fn run(&self) -> Result<Output> {
        tracing::debug!("running `{}`", self);

        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "`{}` failed ({})\n{}",
                self,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(output)
    }

    /// Run and return stdout, trimmed.
    pub fn read_stdout(&self) -> Result<String> {
        let output = self.run()?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run attached to the terminal and return how it exited.
    pub fn status(&self) -> Result<ExitStatus> {
        tracing::debug!("running `{}`", self);

        self.command()
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }
}

impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Locate `name` on PATH.
pub fn require_executable(name: &str) -> Result<PathBuf> {
    which::which(name).with_context(|| format!("`{}` not found in PATH", name))
}

/// The configured `go` binary, or the one on PATH.
pub fn find_go(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => require_executable("go"),
    }
}
