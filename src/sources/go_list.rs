//! Go list loader - package metadata from the `go` tool.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use regex::Regex;

use crate::core::Package;
use crate::sources::PackageLoader;
use crate::util::process::{find_go, ProcessBuilder};

/// Loads packages by running `go list -e -json` in a directory.
pub struct GoListLoader {
    /// The `go` binary
    go: PathBuf,

    /// Directory relative patterns are resolved against
    cwd: PathBuf,
}

impl GoListLoader {
    /// Create a loader using the configured `go` binary, or the one in PATH.
    pub fn new(configured: Option<&Path>, cwd: &Path) -> Result<Self> {
        Ok(GoListLoader {
            go: find_go(configured)?,
            cwd: cwd.to_path_buf(),
        })
    }

    /// The `go` binary this loader runs.
    pub fn go_binary(&self) -> &Path {
        &self.go
    }

    fn command(&self) -> ProcessBuilder {
        // Dependencies are located through GOPATH, never through modules.
        ProcessBuilder::new(&self.go)
            .env("GO111MODULE", "off")
            .cwd(&self.cwd)
    }
}

impl PackageLoader for GoListLoader {
    fn load(&self, patterns: &[String]) -> Result<Vec<Package>> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let output = self
            .command()
            .args(["list", "-e", "-json"])
            .args(patterns)
            .run()?;

        parse_package_stream(&output.stdout)
    }

    fn toolchain_version(&self) -> Result<String> {
        parse_go_version(&self.command().arg("version").read_stdout()?)
    }
}

/// Decode the concatenated JSON objects printed by `go list -json`.
pub fn parse_package_stream(bytes: &[u8]) -> Result<Vec<Package>> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Package>()
        .map(|pkg| pkg.context("failed to decode `go list` output"))
        .collect()
}

/// Extract the version word from `go version` output.
pub fn parse_go_version(output: &str) -> Result<String> {
    let re = Regex::new(r"go version (\S+)").context("invalid version pattern")?;
    match re.captures(output) {
        Some(caps) => Ok(caps[1].to_string()),
        None => bail!("unexpected `go version` output: {}", output.trim()),
    }
}
