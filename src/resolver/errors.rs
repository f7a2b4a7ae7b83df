//! Resolution and reconciliation error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while resolving or reconciling dependencies.
///
/// Every variant is raised before any file is written.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("error loading packages ({count} failed)")]
    LoadFailed { count: usize },

    #[error("no package found in the current directory")]
    NoProjectPackage,

    #[error("directory {dir} is not inside a version control repository")]
    NoRepository { dir: PathBuf },

    #[error("dirty working tree: {dir}")]
    DirtyWorkingTree { dir: PathBuf },

    #[error("{import_path}: revision is {have}, want {want}")]
    RevisionMismatch {
        import_path: String,
        have: String,
        want: String,
    },

    #[error("Unsupported sandbox VCS: {}", names.join(", "))]
    UnsupportedVcs { names: Vec<String> },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            ResolveError::LoadFailed { .. } => {
                diag.with_note("the failures are listed above")
            }
            ResolveError::NoProjectPackage => {
                diag.with_help("Run `deppy save` from the directory of the project's root package")
            }
            ResolveError::NoRepository { dir } => diag
                .with_location(dir)
                .with_help(suggestions::NO_REPOSITORY),
            ResolveError::DirtyWorkingTree { dir } => diag
                .with_location(dir)
                .with_help(suggestions::DIRTY_TREE),
            ResolveError::RevisionMismatch {
                import_path,
                have,
                want,
            } => diag
                .with_note(format!("`{}` is checked out at {}", import_path, have))
                .with_note(format!(
                    "the same repository is already pinned at {} in Deps/Deps.json",
                    want
                ))
                .with_help(suggestions::REV_MISMATCH),
            ResolveError::UnsupportedVcs { .. } => {
                diag.with_help(suggestions::UNSUPPORTED_VCS)
            }
        }
    }
}
