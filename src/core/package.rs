//! Package - a Go package as reported by the package loader.
//!
//! Field names follow the JSON emitted by `go list -json`, so a `Package`
//! can be decoded directly from the toolchain's output.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single Go package and its place in the GOPATH.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Package {
    /// Directory containing the package sources
    pub dir: PathBuf,

    /// Import path of the package
    pub import_path: String,

    /// GOPATH workspace (or GOROOT) containing the package
    pub root: PathBuf,

    /// Whether this is a standard library package
    pub standard: bool,

    /// All (recursively) imported dependencies
    pub deps: Vec<String>,

    /// Imports from `_test.go` files of the same package
    pub test_imports: Vec<String>,

    /// Imports from `_test.go` files of the external test package
    #[serde(rename = "XTestImports")]
    pub x_test_imports: Vec<String>,

    /// Go source files
    pub go_files: Vec<String>,

    /// Go source files that import "C"
    pub cgo_files: Vec<String>,

    /// Go source files ignored due to build constraints
    pub ignored_go_files: Vec<String>,

    /// `_test.go` files in the package
    pub test_go_files: Vec<String>,

    /// `_test.go` files outside the package
    #[serde(rename = "XTestGoFiles")]
    pub x_test_go_files: Vec<String>,

    /// Error loading the package, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PackageError>,
}

/// Error reported by the loader for a package it could not load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PackageError {
    /// Error message
    pub err: String,
}

impl Package {
    /// Create a package with the given import path and directory.
    pub fn new(import_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Package {
            import_path: import_path.into(),
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Get the loader error message, if the package failed to load.
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .map(|e| e.err.as_str())
            .filter(|e| !e.is_empty())
    }

    /// The `src` directory of the workspace containing this package.
    pub fn src_root(&self) -> PathBuf {
        self.root.join("src")
    }

    /// All Go source files of the package, as absolute paths.
    pub fn source_files(&self) -> Vec<PathBuf> {
        let dir: &Path = &self.dir;
        self.go_files
            .iter()
            .chain(&self.cgo_files)
            .chain(&self.ignored_go_files)
            .chain(&self.test_go_files)
            .chain(&self.x_test_go_files)
            .map(|f| dir.join(f))
            .collect()
    }

    /// Imports of both kinds of test files.
    pub fn all_test_imports(&self) -> impl Iterator<Item = &String> {
        self.test_imports.iter().chain(&self.x_test_imports)
    }
}
