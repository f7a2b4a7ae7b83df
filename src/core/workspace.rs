//! Project - the layout of a project being vendored.
//!
//! A Project ties the project's import path to the directory it lives in,
//! and knows where the manifest and the private vendor workspace go.

use std::path::{Path, PathBuf};

/// Directory holding the manifest and vendor workspace.
pub const DEPS_DIR: &str = "Deps";

/// Manifest file name inside [`DEPS_DIR`].
pub const MANIFEST_NAME: &str = "Deps.json";

/// Vendor workspace (a GOPATH entry) inside [`DEPS_DIR`].
pub const VENDOR_WORKSPACE_DIR: &str = "_workspace";

/// Source directory of the vendor workspace.
pub const VENDOR_SRC_DIR: &str = "src";

/// Separator between a project's import path and a vendored import path.
pub const VENDOR_SEP: &str = "/Deps/_workspace/src/";

/// A project rooted at a directory, with its own import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory containing the project's root package
    root: PathBuf,

    /// Import path of the project's root package
    import_path: String,
}

impl Project {
    /// Create a project rooted at `root` with the given import path.
    pub fn new(root: impl Into<PathBuf>, import_path: impl Into<String>) -> Self {
        Project {
            root: root.into(),
            import_path: import_path.into(),
        }
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the project's import path.
    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    /// Get the `Deps` directory.
    pub fn deps_dir(&self) -> PathBuf {
        deps_dir(&self.root)
    }

    /// Get the manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.deps_dir().join(MANIFEST_NAME)
    }

    /// Get the vendor workspace directory (the GOPATH entry).
    pub fn vendor_workspace(&self) -> PathBuf {
        vendor_workspace(&self.root)
    }

    /// Get the vendor source directory, where dependency sources are copied.
    pub fn vendor_src_dir(&self) -> PathBuf {
        self.vendor_workspace().join(VENDOR_SRC_DIR)
    }

    /// Check whether a directory lies inside this project's vendor workspace.
    pub fn is_vendored(&self, dir: &Path) -> bool {
        dir.starts_with(self.vendor_workspace())
    }
}

/// The `Deps` directory of a project rooted at `root`.
pub fn deps_dir(root: &Path) -> PathBuf {
    root.join(DEPS_DIR)
}

/// The vendor workspace of a project rooted at `root`.
pub fn vendor_workspace(root: &Path) -> PathBuf {
    deps_dir(root).join(VENDOR_WORKSPACE_DIR)
}
