//! Bazaar adapter, driving the `bzr` command.
//!
//! Bazaar dependencies can be resolved and described, but vendored copies
//! cannot be recreated from them, so `save` rejects them.

use std::path::Path;

use anyhow::Result;

use crate::util::process::{require_executable, ProcessBuilder};
use crate::vcs::{Vcs, VcsKind};

/// Bazaar branches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bazaar;

impl Bazaar {
    fn bzr(dir: &Path) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(require_executable("bzr")?).cwd(dir))
    }
}

impl Vcs for Bazaar {
    fn kind(&self) -> VcsKind {
        VcsKind::Bzr
    }

    fn identify(&self, dir: &Path) -> Result<String> {
        Self::bzr(dir)?
            .args(["version-info", "--custom", "--template={revision_id}"])
            .read_stdout()
    }

    fn describe(&self, dir: &Path, rev: &str) -> String {
        match Self::bzr(dir).and_then(|bzr| bzr.arg("revno").read_stdout()) {
            Ok(revno) => revno,
            Err(e) => {
                tracing::debug!("no revno for {} in {}: {:#}", rev, dir.display(), e);
                String::new()
            }
        }
    }

    fn is_dirty(&self, dir: &Path, _rev: &str) -> Result<bool> {
        let changes = Self::bzr(dir)?
            .args(["status", "--short", "--versioned"])
            .read_stdout()?;
        Ok(!changes.is_empty())
    }
}
