//! Git adapter, backed by libgit2.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Oid, Repository, StatusOptions};

use crate::vcs::{Vcs, VcsKind};

/// Git repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

impl Git {
    fn open(dir: &Path) -> Result<Repository> {
        Repository::discover(dir)
            .with_context(|| format!("failed to open git repository at {}", dir.display()))
    }
}

impl Vcs for Git {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn identify(&self, dir: &Path) -> Result<String> {
        let repo = Self::open(dir)?;
        let head = repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .with_context(|| format!("failed to read HEAD commit in {}", dir.display()))?;
        Ok(head.id().to_string())
    }

    fn describe(&self, dir: &Path, rev: &str) -> String {
        let describe = || -> Result<String> {
            let repo = Self::open(dir)?;
            let commit = repo.find_commit(Oid::from_str(rev)?)?;
            let description = commit
                .as_object()
                .describe(DescribeOptions::new().describe_tags())?;
            Ok(description.format(Some(&DescribeFormatOptions::new()))?)
        };

        match describe() {
            Ok(tag) => tag,
            Err(e) => {
                tracing::debug!("no tag for {} in {}: {}", rev, dir.display(), e);
                String::new()
            }
        }
    }

    // Status is against HEAD, which is `rev` as identified.
    fn is_dirty(&self, dir: &Path, _rev: &str) -> Result<bool> {
        let repo = Self::open(dir)?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = repo
            .statuses(Some(&mut opts))
            .with_context(|| format!("failed to read git status in {}", dir.display()))?;
        Ok(!statuses.is_empty())
    }
}
