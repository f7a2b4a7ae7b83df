//! Rewriting import paths across a set of files.
//!
//! A [`RewritePlan`] is computed for every file before any file is written,
//! so a file that fails to scan leaves the whole tree untouched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::rewrite::imports::{scan_imports, ImportParseError};
use crate::rewrite::qualify::rewrite_import_path;
use crate::util::fs::{read_to_string, write_string};

/// A pending change to one file.
#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub original: String,
    pub rewritten: String,
}

/// Every change a rewrite pass will make.
#[derive(Debug, Default)]
pub struct RewritePlan {
    files: Vec<FileRewrite>,
}

impl RewritePlan {
    /// Plan the rewrite of the given files.
    pub fn for_files<S: AsRef<str>>(files: &[PathBuf], proj: &str, deps: &[S]) -> Result<Self> {
        let mut plan = RewritePlan::default();

        for path in files {
            let original = read_to_string(path)?;
            let name = path.display().to_string();

            if let Some(rewritten) = rewrite_source(&name, &original, proj, deps)? {
                tracing::debug!("will rewrite {}", path.display());
                plan.files.push(FileRewrite {
                    path: path.clone(),
                    original,
                    rewritten,
                });
            }
        }

        Ok(plan)
    }

    /// Plan the rewrite of every Go file below `dir`.
    pub fn for_tree<S: AsRef<str>>(dir: &Path, proj: &str, deps: &[S]) -> Result<Self> {
        Self::for_files(&go_files(dir)?, proj, deps)
    }

    /// Files that will change.
    pub fn files(&self) -> &[FileRewrite] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every changed file, returning how many were written.
    pub fn apply(&self) -> Result<usize> {
        for file in &self.files {
            write_string(&file.path, &file.rewritten)?;
        }
        Ok(self.files.len())
    }
}

/// Rewrite the import literals of one source text.
///
/// Returns `None` when no import changes. Everything outside the rewritten
/// literals is preserved byte for byte.
pub fn rewrite_source<S: AsRef<str>>(
    name: &str,
    text: &str,
    proj: &str,
    deps: &[S],
) -> Result<Option<String>, ImportParseError> {
    let specs = scan_imports(name, text)?;

    let mut out = text.to_string();
    let mut changed = false;
    for spec in specs.iter().rev() {
        let path = rewrite_import_path(&spec.path, proj, deps);
        if path != spec.path {
            out.replace_range(spec.span.clone(), &spec.literal(&path));
            changed = true;
        }
    }

    Ok(changed.then_some(out))
}

/// Go source files below `dir`, sorted.
///
/// `testdata` and dot directories are skipped like the go tool does, but
/// underscore directories are entered so vendored sources are included.
pub fn go_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir).sort_by_file_name().into_iter().filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        let name = e.file_name().to_string_lossy();
        name != "testdata" && !name.starts_with('.')
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        let is_go = entry.path().extension().is_some_and(|ext| ext == "go");
        if entry.file_type().is_file() && is_go {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Rewrite every Go file below `dir`.
pub fn rewrite_tree<S: AsRef<str>>(dir: &Path, proj: &str, deps: &[S]) -> Result<usize> {
    RewritePlan::for_tree(dir, proj, deps)?.apply()
}

/// Rewrite the given files.
pub fn rewrite_files<S: AsRef<str>>(files: &[PathBuf], proj: &str, deps: &[S]) -> Result<usize> {
    RewritePlan::for_files(files, proj, deps)?.apply()
}
