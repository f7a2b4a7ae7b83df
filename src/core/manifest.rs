//! Manifest - the `Deps/Deps.json` file.
//!
//! The manifest records the project's import path, the Go toolchain it was
//! saved with, the package patterns given to `save`, and every dependency
//! pinned to its revision. Key names and order are part of the format:
//!
//! ```json
//! {
//! 	"ImportPath": "example.com/app",
//! 	"GoVersion": "go1.21.3",
//! 	"Packages": ["./..."],
//! 	"Deps": [
//! 		{"ImportPath": "github.com/x/y", "Comment": "v1.2.0", "Rev": "..."}
//! 	]
//! }
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::Dependency;

/// The persisted list of a project's pinned dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Manifest {
    /// Import path of the project
    #[serde(default)]
    pub import_path: String,

    /// Abridged output of `go version`
    #[serde(default)]
    pub go_version: String,

    /// Arguments to `deppy save`, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Pinned dependencies, always serialized as a list
    #[serde(default)]
    pub deps: Vec<Dependency>,
}

impl Manifest {
    /// Create an empty manifest for a project.
    pub fn new(import_path: impl Into<String>, go_version: impl Into<String>) -> Self {
        Manifest {
            import_path: import_path.into(),
            go_version: go_version.into(),
            packages: Vec::new(),
            deps: Vec::new(),
        }
    }

    /// Set the package patterns the manifest was saved with.
    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = packages;
        self
    }

    /// Find a dependency by import path.
    pub fn dependency(&self, import_path: &str) -> Option<&Dependency> {
        self.deps.iter().find(|d| d.import_path == import_path)
    }

    /// Import paths of all dependencies.
    pub fn import_paths(&self) -> Vec<String> {
        self.deps.iter().map(|d| d.import_path.clone()).collect()
    }

    /// Sort dependencies by import path for deterministic output.
    pub fn sort_deps(&mut self) {
        self.deps.sort_by(|a, b| a.import_path.cmp(&b.import_path));
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse manifest")
    }

    /// Encode the manifest as tab-indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .context("failed to serialize manifest")?;
        buf.push(b'\n');
        String::from_utf8(buf).context("manifest is not valid UTF-8")
    }

    /// Load a manifest, returning `None` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("invalid manifest: {}", path.display()))
            .map(Some)
    }

    /// Save the manifest.
    ///
    /// The content is written to a temporary file next to `path` and then
    /// renamed over it, so a reader sees either the old or the new manifest.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        let dir = path.parent().unwrap_or(Path::new("."));

        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())
            .context("failed to write manifest")?;
        tmp.as_file()
            .sync_all()
            .context("failed to flush manifest")?;
        tmp.persist(path)
            .with_context(|| format!("failed to write manifest: {}", path.display()))?;

        tracing::debug!("wrote manifest {}", path.display());
        Ok(())
    }
}
