//! Dependency closure of a set of root packages.
//!
//! Every non-standard package the roots (and their tests) import is mapped
//! to the repository holding it. Packages in the same repository as a root
//! are skipped, as are sub-packages of a package already recorded (its
//! directory is copied whole). Sibling packages of one repository each get
//! their own entry, sharing `root` and `Rev`. A repository whose VCS cannot
//! be vendored fails the whole resolve before its revision is read.

use anyhow::{Error, Result};

use crate::core::dependency::contains_path_prefix;
use crate::core::{Dependency, Package, Project};
use crate::resolver::{check_sandbox_vcs, ResolveError};
use crate::rewrite::unqualify;
use crate::sources::PackageLoader;
use crate::vcs::{find_repo_root, RepoRoot};

/// Resolve the dependencies of `roots`.
///
/// Every package is examined even after a failure; failures are logged as
/// they are found and reported together at the end.
pub fn load_dependencies(
    project: &Project,
    loader: &dyn PackageLoader,
    roots: &[Package],
) -> Result<Vec<Dependency>> {
    let mut failures: Vec<Error> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut paths: Vec<String> = Vec::new();
    let mut test_imports: Vec<String> = Vec::new();

    for pkg in roots {
        if pkg.standard {
            continue;
        }
        if let Some(err) = pkg.error_message() {
            failures.push(anyhow::anyhow!("{}: {}", pkg.import_path, err));
            continue;
        }

        match find_repo_root(&pkg.dir, &pkg.src_root()) {
            Ok(repo) => seen.push(repo.import_path),
            Err(e) => {
                failures.push(e.into());
                continue;
            }
        }

        paths.extend(pkg.deps.iter().cloned());
        test_imports.extend(pkg.all_test_imports().cloned());
    }

    test_imports.sort();
    test_imports.dedup();
    for pkg in loader.load(&test_imports)? {
        if pkg.standard {
            continue;
        }
        if let Some(err) = pkg.error_message() {
            failures.push(anyhow::anyhow!("{}: {}", pkg.import_path, err));
            continue;
        }
        paths.push(pkg.import_path);
        paths.extend(pkg.deps);
    }

    let mut paths: Vec<String> = paths.iter().map(|p| unqualify(p).to_string()).collect();
    paths.sort();
    paths.dedup();
    tracing::debug!("examining {} imported packages", paths.len());

    let mut deps = Vec::new();
    let mut unsupported = Vec::new();
    for pkg in loader.load(&paths)? {
        if let Some(err) = pkg.error_message() {
            failures.push(anyhow::anyhow!("{}: {}", pkg.import_path, err));
            continue;
        }
        if pkg.standard || project.is_vendored(&pkg.dir) {
            continue;
        }
        if contains_path_prefix(&seen, &pkg.import_path) {
            tracing::debug!("{} is covered by a recorded package", pkg.import_path);
            continue;
        }

        let repo = match find_repo_root(&pkg.dir, &pkg.src_root()) {
            Ok(repo) => repo,
            Err(e) => {
                failures.push(e.into());
                continue;
            }
        };
        seen.push(pkg.import_path.clone());

        if !repo.kind.supports_sandbox_copy() {
            tracing::debug!("{} is in a {} repository", pkg.import_path, repo.kind);
            unsupported.push(
                Dependency::new(&pkg.import_path, "")
                    .with_root(repo.import_path)
                    .with_vcs(repo.kind),
            );
            continue;
        }

        match dependency_for(&pkg, repo) {
            Ok(dep) => deps.push(dep),
            Err(e) => failures.push(e),
        }
    }

    check_sandbox_vcs(&unsupported)?;

    match failures.len() {
        0 => Ok(deps),
        1 => Err(failures.remove(0)),
        count => {
            for failure in &failures {
                tracing::error!("{:#}", failure);
            }
            Err(ResolveError::LoadFailed { count }.into())
        }
    }
}

fn dependency_for(pkg: &Package, repo: RepoRoot) -> Result<Dependency> {
    let vcs = repo.kind.backend();

    let rev = vcs.identify(&pkg.dir)?;
    if vcs.is_dirty(&pkg.dir, &rev)? {
        return Err(ResolveError::DirtyWorkingTree {
            dir: pkg.dir.clone(),
        }
        .into());
    }
    let comment = vcs.describe(&pkg.dir, &rev);

    tracing::debug!("{} at {} ({})", pkg.import_path, rev, repo.kind);
    Ok(Dependency::new(&pkg.import_path, rev)
        .with_comment(comment)
        .with_root(repo.import_path)
        .with_location(&pkg.root, &pkg.dir)
        .with_vcs(repo.kind))
}
