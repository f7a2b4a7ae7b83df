//! Reconciling freshly resolved dependencies with the saved manifest.
//!
//! A pinned revision is carried forward unchanged for every import path
//! the old manifest already knows. A package that is new to the manifest
//! but belongs to a repository the manifest already pins (a sibling
//! sub-package, or a parent package) must be checked out at the pinned
//! revision: one repository is never recorded at two revisions.

use crate::core::dependency::is_sub_path;
use crate::core::{Dependency, Manifest};
use crate::resolver::ResolveError;

/// Copy `Rev` and `Comment` from `old` into `new` for each dependency with
/// an identical import path, and reject dependencies whose repository is
/// already pinned at a different revision.
pub fn carry_versions(old: &Manifest, new: &mut Manifest) -> Result<(), ResolveError> {
    for dep in &mut new.deps {
        carry_version(old, dep)?;
    }
    Ok(())
}

fn carry_version(old: &Manifest, dep: &mut Dependency) -> Result<(), ResolveError> {
    if let Some(pinned) = old.dependency(&dep.import_path) {
        dep.rev = pinned.rev.clone();
        dep.comment = pinned.comment.clone();
        return Ok(());
    }

    for pinned in &old.deps {
        let child = is_sub_path(&dep.import_path, &pinned.import_path);
        let parent = !dep.root.is_empty() && is_sub_path(&pinned.import_path, &dep.root);

        if (child || parent) && pinned.rev != dep.rev {
            return Err(ResolveError::RevisionMismatch {
                import_path: dep.import_path.clone(),
                have: dep.rev.clone(),
                want: pinned.rev.clone(),
            });
        }
    }

    tracing::debug!("new dependency {} at {}", dep.import_path, dep.rev);
    Ok(())
}

/// Names of version control systems among `deps` that cannot be vendored,
/// sorted and de-duplicated.
pub fn bad_sandbox_vcs(deps: &[Dependency]) -> Vec<String> {
    let mut names: Vec<String> = deps
        .iter()
        .filter_map(|d| d.vcs)
        .filter(|vcs| !vcs.supports_sandbox_copy())
        .map(|vcs| vcs.name().to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Fail if any dependency lives in a repository that cannot be vendored.
pub fn check_sandbox_vcs(deps: &[Dependency]) -> Result<(), ResolveError> {
    let names = bad_sandbox_vcs(deps);
    if names.is_empty() {
        Ok(())
    } else {
        Err(ResolveError::UnsupportedVcs { names })
    }
}

/// Dependencies in `a` that are not in `b`, by import path.
pub fn sub_deps(a: &[Dependency], b: &[Dependency]) -> Vec<Dependency> {
    a.iter()
        .filter(|da| !b.iter().any(|db| db.import_path == da.import_path))
        .cloned()
        .collect()
}
