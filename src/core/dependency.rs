//! Dependency - an external package pinned to a VCS revision.
//!
//! Only `ImportPath`, `Comment` and `Rev` are persisted in the manifest.
//! The remaining fields describe where the dependency was found on disk
//! and are filled in by the resolver for the duration of one invocation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::vcs::VcsKind;

/// A dependency of the project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dependency {
    /// Import path of the package
    pub import_path: String,

    /// Tag or description of the revision
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    /// VCS-specific revision identifier
    #[serde(default)]
    pub rev: String,

    /// Import path of the repository root
    #[serde(skip)]
    pub root: String,

    /// GOPATH workspace the package was found in
    #[serde(skip)]
    pub ws: PathBuf,

    /// Directory of the package sources
    #[serde(skip)]
    pub dir: PathBuf,

    /// Version control system of the repository
    #[serde(skip)]
    pub vcs: Option<VcsKind>,
}

impl Dependency {
    /// Create a dependency with just an import path and revision.
    pub fn new(import_path: impl Into<String>, rev: impl Into<String>) -> Self {
        Dependency {
            import_path: import_path.into(),
            rev: rev.into(),
            ..Default::default()
        }
    }

    /// Set the tag or description of the revision.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the repository root import path.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Set where the dependency was found on disk.
    pub fn with_location(mut self, ws: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        self.ws = ws.into();
        self.dir = dir.into();
        self
    }

    /// Set the version control system.
    pub fn with_vcs(mut self, vcs: VcsKind) -> Self {
        self.vcs = Some(vcs);
        self
    }

    /// Path of the package directory relative to its workspace `src` dir.
    pub fn src_relative_dir(&self) -> Option<&Path> {
        self.dir.strip_prefix(self.ws.join("src")).ok()
    }
}

impl PartialEq for Dependency {
    fn eq(&self, other: &Self) -> bool {
        self.import_path == other.import_path
    }
}

impl Eq for Dependency {}

/// Check whether `path` equals one of `prefixes` or lies beneath one of them.
pub fn contains_path_prefix<S: AsRef<str>>(prefixes: &[S], path: &str) -> bool {
    prefixes.iter().any(|p| is_path_or_sub_path(path, p.as_ref()))
}

/// Check whether `path` equals `base` or is a sub-path of it.
pub fn is_path_or_sub_path(path: &str, base: &str) -> bool {
    path == base || is_sub_path(path, base)
}

/// Check whether `path` lies strictly beneath `base`.
pub fn is_sub_path(path: &str, base: &str) -> bool {
    path.len() > base.len() && path.starts_with(base) && path.as_bytes()[base.len()] == b'/'
}
