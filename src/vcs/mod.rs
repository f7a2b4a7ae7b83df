//! Version control adapters.
//!
//! Each supported version control system implements [`Vcs`]. The system
//! owning a directory is chosen by looking for its marker directory
//! (`.git`, `.hg`, `.bzr`) while walking up from the package directory.

pub mod bzr;
pub mod git;
pub mod hg;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::resolver::ResolveError;

pub use bzr::Bazaar;
pub use git::Git;
pub use hg::Mercurial;

/// Operations deppy needs from a version control system.
pub trait Vcs {
    /// Which system this is.
    fn kind(&self) -> VcsKind;

    /// The revision currently checked out in the repository containing `dir`.
    fn identify(&self, dir: &Path) -> Result<String>;

    /// A human-readable tag or description of `rev`, empty if none.
    fn describe(&self, dir: &Path, rev: &str) -> String;

    /// Whether tracked files anywhere in the repository containing `dir`
    /// differ from `rev`.
    ///
    /// `rev` is what [`Vcs::identify`] returned for `dir`. Git compares
    /// against the checked-out commit and does not use it.
    fn is_dirty(&self, dir: &Path, rev: &str) -> Result<bool>;
}

/// The version control systems deppy recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VcsKind {
    Git,
    Hg,
    Bzr,
}

impl VcsKind {
    /// All kinds, in detection order.
    pub const ALL: [VcsKind; 3] = [VcsKind::Git, VcsKind::Hg, VcsKind::Bzr];

    /// Command name of the system.
    pub fn name(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Hg => "hg",
            VcsKind::Bzr => "bzr",
        }
    }

    /// Metadata directory marking a repository root.
    pub fn marker(&self) -> &'static str {
        match self {
            VcsKind::Git => ".git",
            VcsKind::Hg => ".hg",
            VcsKind::Bzr => ".bzr",
        }
    }

    /// Whether a vendored copy from this system can be recreated at a
    /// pinned revision. Bazaar has no checkout command wired up.
    pub fn supports_sandbox_copy(&self) -> bool {
        match self {
            VcsKind::Git | VcsKind::Hg => true,
            VcsKind::Bzr => false,
        }
    }

    /// The adapter implementing this system.
    pub fn backend(&self) -> &'static dyn Vcs {
        match self {
            VcsKind::Git => &Git,
            VcsKind::Hg => &Mercurial,
            VcsKind::Bzr => &Bazaar,
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A repository found by [`find_repo_root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot {
    /// Version control system of the repository
    pub kind: VcsKind,

    /// Directory containing the VCS metadata
    pub dir: PathBuf,

    /// Import path of the repository root, relative to the `src` root
    pub import_path: String,
}

/// Find the repository containing `dir`.
///
/// Walks from `dir` up to (but not including) `src_root`, returning the
/// first directory holding a VCS marker.
pub fn find_repo_root(dir: &Path, src_root: &Path) -> Result<RepoRoot, ResolveError> {
    let mut current = Some(dir);

    while let Some(candidate) = current {
        if !candidate.starts_with(src_root) || candidate == src_root {
            break;
        }

        for kind in VcsKind::ALL {
            if candidate.join(kind.marker()).exists() {
                let rel = candidate
                    .strip_prefix(src_root)
                    .unwrap_or(candidate);
                return Ok(RepoRoot {
                    kind,
                    dir: candidate.to_path_buf(),
                    import_path: to_slash(rel),
                });
            }
        }

        current = candidate.parent();
    }

    Err(ResolveError::NoRepository {
        dir: dir.to_path_buf(),
    })
}

/// Render a relative path with `/` separators, as an import path.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
