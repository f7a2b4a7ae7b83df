//! Configuration file support for Deppy.
//!
//! Deppy reads two configuration file locations:
//! - Global: `~/.deppy/config.toml` - User-wide defaults
//! - Project: `.deppy/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [save]
//! rewrite = true
//!
//! [toolchain]
//! go = "/usr/local/go/bin/go"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Deppy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for `deppy save`
    pub save: SaveConfig,

    /// Go toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Settings for `deppy save`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Rewrite imports of dependencies to their vendored paths, as if
    /// `-r` was always given
    pub rewrite: Option<bool>,
}

/// Go toolchain settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the `go` binary (defaults to the one in PATH)
    pub go: Option<PathBuf>,
}

impl Config {
    /// Parse one configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// A layer for [`load_config`]; a broken file is skipped with a warning.
    fn layer(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        Self::load(path)
            .map_err(|e| tracing::warn!("ignoring config: {:#}", e))
            .ok()
    }

    /// Settings from `top` win over `self`.
    fn overlay(self, top: Config) -> Config {
        Config {
            save: SaveConfig {
                rewrite: top.save.rewrite.or(self.save.rewrite),
            },
            toolchain: ToolchainSettings {
                go: top.toolchain.go.or(self.toolchain.go),
            },
        }
    }

    /// Whether `save` rewrites dependency imports by default.
    pub fn rewrite_by_default(&self) -> bool {
        self.save.rewrite.unwrap_or(false)
    }

    /// Explicitly configured `go` binary, if any.
    pub fn go_binary(&self) -> Option<&Path> {
        self.toolchain.go.as_deref()
    }
}

/// Defaults, then the global file, then the project file.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    [global_path, Some(project_path)]
        .into_iter()
        .flatten()
        .filter_map(Config::layer)
        .fold(Config::default(), Config::overlay)
}

/// `~/.deppy/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".deppy").join("config.toml"))
}

/// `<project>/.deppy/config.toml`
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".deppy").join("config.toml")
}
