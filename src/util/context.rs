//! Per-invocation context: where deppy runs and with which settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::sources::GoListLoader;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// The project directory for `save`, `path` and `go`
    cwd: PathBuf,
    config: Config,
}

impl GlobalContext {
    /// Context for the process's current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Context for `cwd`, reading its `.deppy/config.toml` over the global one.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));
        GlobalContext { cwd, config }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A `go list` loader for the configured toolchain, running in the cwd.
    pub fn package_loader(&self) -> Result<GoListLoader> {
        GoListLoader::new(self.config.go_binary(), &self.cwd)
    }
}
