//! Mapping between bare and vendor-qualified import paths.
//!
//! A dependency `D` of project `C` is imported as
//! `C/Deps/_workspace/src/D` once vendored. Vendored code may itself carry
//! qualified imports from its own project (`D/Deps/_workspace/src/T`); the
//! last separator always wins, so any nesting collapses to the bare path.

use crate::core::dependency::contains_path_prefix;
use crate::core::VENDOR_SEP;

/// Qualify `path` under `proj` if it is one of `deps` or a sub-package of one.
pub fn qualify<S: AsRef<str>>(path: &str, proj: &str, deps: &[S]) -> String {
    if contains_path_prefix(deps, path) {
        format!("{proj}{VENDOR_SEP}{path}")
    } else {
        path.to_string()
    }
}

/// Strip every vendor qualification from `path`.
pub fn unqualify(path: &str) -> &str {
    match path.rfind(VENDOR_SEP) {
        Some(i) => &path[i + VENDOR_SEP.len()..],
        None => path,
    }
}

/// The import path `path` should have in project `proj`.
pub fn rewrite_import_path<S: AsRef<str>>(path: &str, proj: &str, deps: &[S]) -> String {
    qualify(unqualify(path), proj, deps)
}
