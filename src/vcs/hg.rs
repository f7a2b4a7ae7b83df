//! Mercurial adapter, driving the `hg` command.

use std::path::Path;

use anyhow::Result;

use crate::util::process::{require_executable, ProcessBuilder};
use crate::vcs::{Vcs, VcsKind};

/// Mercurial repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mercurial;

impl Mercurial {
    fn hg(dir: &Path) -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::new(require_executable("hg")?).cwd(dir))
    }
}

impl Vcs for Mercurial {
    fn kind(&self) -> VcsKind {
        VcsKind::Hg
    }

    fn identify(&self, dir: &Path) -> Result<String> {
        let id = Self::hg(dir)?
            .args(["identify", "--id", "--debug"])
            .read_stdout()?;
        Ok(parse_identify(&id))
    }

    fn describe(&self, dir: &Path, rev: &str) -> String {
        let out = Self::hg(dir).and_then(|hg| {
            hg.args(["log", "-r", rev, "--template", "{latesttag}-{latesttagdistance}"])
                .read_stdout()
        });

        match out {
            Ok(out) => parse_describe(&out),
            Err(e) => {
                tracing::debug!("no tag for {} in {}: {:#}", rev, dir.display(), e);
                String::new()
            }
        }
    }

    fn is_dirty(&self, dir: &Path, rev: &str) -> Result<bool> {
        let changes = Self::hg(dir)?
            .args(["status", "--modified", "--added", "--removed", "--deleted", "--rev", rev])
            .read_stdout()?;
        Ok(!changes.is_empty())
    }
}

/// `hg identify` appends `+` to the id of a modified working copy.
fn parse_identify(output: &str) -> String {
    output.trim().trim_end_matches('+').to_string()
}

/// Drop the distance when the revision is exactly at the tag, and treat
/// the implicit `null` tag as no tag at all.
fn parse_describe(output: &str) -> String {
    let output = output.trim();
    match output.rsplit_once('-') {
        Some(("null", _)) | Some(("", _)) => String::new(),
        Some((tag, "0")) => tag.to_string(),
        _ => output.to_string(),
    }
}
