//! Implementation of `deppy go` and `deppy path`.
//!
//! Both expose the vendor workspace as a GOPATH entry so builds pick up the
//! saved copies of dependencies.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::core::workspace::vendor_workspace;
use crate::util::process::ProcessBuilder;

/// Absolute path of the vendor workspace of the project in `project_dir`.
pub fn workspace_path(project_dir: &Path) -> Result<PathBuf> {
    let dir = std::path::absolute(project_dir)
        .with_context(|| format!("failed to resolve {}", project_dir.display()))?;
    Ok(vendor_workspace(&dir))
}

/// `GOPATH` with the vendor workspace in front of `current`.
pub fn sandbox_gopath(project_dir: &Path, current: Option<OsString>) -> Result<OsString> {
    let mut entries = vec![workspace_path(project_dir)?];
    if let Some(current) = current {
        entries.extend(std::env::split_paths(&current).filter(|p| !p.as_os_str().is_empty()));
    }
    std::env::join_paths(entries).context("GOPATH entry contains a path separator")
}

/// The `go` invocation for `deppy go <args>`.
pub fn go_command(go: &Path, project_dir: &Path, args: &[String]) -> Result<ProcessBuilder> {
    let gopath = sandbox_gopath(project_dir, std::env::var_os("GOPATH"))?;
    tracing::debug!("GOPATH={}", gopath.to_string_lossy());

    Ok(ProcessBuilder::new(go)
        .args(args)
        .env("GOPATH", gopath)
        .cwd(project_dir))
}

/// Run `go` with the vendor workspace on `GOPATH`.
pub fn run_go(go: &Path, project_dir: &Path, args: &[String]) -> Result<ExitStatus> {
    go_command(go, project_dir, args)?.status()
}
