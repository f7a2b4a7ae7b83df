//! Import path rewriting.
//!
//! Imports of vendored dependencies are qualified with the project's vendor
//! workspace (`C/Deps/_workspace/src/D`). Rewriting edits only the bytes of
//! import path literals; formatting, comments and aliases are left alone.

pub mod imports;
pub mod plan;
pub mod qualify;

pub use imports::{scan_imports, ImportParseError, ImportSpec};
pub use plan::{go_files, rewrite_files, rewrite_source, rewrite_tree, FileRewrite, RewritePlan};
pub use qualify::{qualify, rewrite_import_path, unqualify};
