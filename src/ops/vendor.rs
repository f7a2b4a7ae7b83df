//! Copying dependency sources into the vendor workspace.

use std::path::Path;

use anyhow::Result;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::Dependency;
use crate::util::fs::{copy_file, remove_dir_all_if_exists, write_string};

/// Ignore file written at the root of the vendor workspace.
pub const VCS_IGNORE: &str = "/pkg\n/bin\n";

/// One or more files could not be copied.
#[derive(Debug, Error)]
#[error("error copying source code ({} failures)", failures.len())]
pub struct CopyError {
    pub failures: Vec<String>,
}

/// Copy each dependency's directory into `vendor_src`.
///
/// The destination of a dependency is its path relative to its workspace's
/// `src` directory. Any previous copy is removed first. Entries whose names
/// start with `.` or `_` are skipped, the same rule the go tool uses when
/// enumerating packages.
pub fn copy_src(vendor_src: &Path, deps: &[Dependency]) -> Result<()> {
    let mut failures = Vec::new();

    for dep in deps {
        let src_root = dep.ws.join("src");
        let Some(rel) = dep.src_relative_dir() else {
            failures.push(format!(
                "{}: {} is not inside {}",
                dep.import_path,
                dep.dir.display(),
                src_root.display()
            ));
            continue;
        };

        let dst_root = vendor_src.join(rel);
        if let Err(e) = remove_dir_all_if_exists(&dst_root) {
            tracing::error!("{:#}", e);
            failures.push(format!("{:#}", e));
        }

        let walker = WalkDir::new(&dep.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let result = entry.map_err(anyhow::Error::from).and_then(|entry| {
                if entry.file_type().is_dir() {
                    return Ok(());
                }
                let rel = entry.path().strip_prefix(&src_root)?;
                copy_file(entry.path(), &vendor_src.join(rel))
            });

            if let Err(e) = result {
                tracing::error!("{:#}", e);
                failures.push(format!("{:#}", e));
            }
        }

        tracing::debug!("copied {} to {}", dep.import_path, dst_root.display());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CopyError { failures }.into())
    }
}

/// Remove the vendored copies of `deps` from `vendor_src`.
pub fn remove_src(vendor_src: &Path, deps: &[Dependency]) -> Result<()> {
    for dep in deps {
        let dir = vendor_src.join(&dep.import_path);
        remove_dir_all_if_exists(&dir)?;
        tracing::debug!("removed {}", dir.display());
    }
    Ok(())
}

/// Keep build output in the vendor workspace out of git.
///
/// Failure is logged and otherwise ignored.
pub fn write_vcs_ignore(vendor_workspace: &Path) {
    let path = vendor_workspace.join(".gitignore");
    if let Err(e) = write_string(&path, VCS_IGNORE) {
        tracing::warn!("{:#}", e);
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}
