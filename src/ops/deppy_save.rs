//! Implementation of `deppy save`.
//!
//! Resolves the project's dependencies, reconciles them with the existing
//! manifest, copies their sources into the vendor workspace, rewrites
//! imports, and finally writes `Deps/Deps.json`. Every check that can fail
//! on user input runs before the first write, and the manifest is written
//! last so it never describes a vendor tree that was not produced.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{Dependency, Manifest, Project};
use crate::ops::vendor::{copy_src, remove_src, write_vcs_ignore};
use crate::resolver::{carry_versions, load_dependencies, sub_deps, ResolveError};
use crate::rewrite::{go_files, RewritePlan};
use crate::sources::PackageLoader;

/// Options for the save command.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Package patterns to save (empty = the package in the project directory)
    pub packages: Vec<String>,

    /// Qualify imports of dependencies with the vendor workspace path
    pub rewrite: bool,
}

/// What a save did.
#[derive(Debug)]
pub struct SaveReport {
    /// The manifest as written
    pub manifest: Manifest,

    /// Where it was written
    pub manifest_path: PathBuf,

    /// Dependencies removed from the vendor workspace
    pub removed: Vec<Dependency>,

    /// Number of source files whose imports changed
    pub rewritten: usize,
}

/// Save the dependencies of the project in `project_dir`.
pub fn save(project_dir: &Path, loader: &dyn PackageLoader, opts: &SaveOptions) -> Result<SaveReport> {
    let dot = loader
        .load(&[".".to_string()])?
        .into_iter()
        .next()
        .ok_or(ResolveError::NoProjectPackage)?;
    if let Some(err) = dot.error_message() {
        tracing::error!("{}", err);
        return Err(ResolveError::NoProjectPackage.into());
    }

    let project = Project::new(project_dir, &dot.import_path);
    let go_version = loader.toolchain_version()?;
    let old = Manifest::load(&project.manifest_path())?.unwrap_or_default();

    let patterns = if opts.packages.is_empty() {
        vec![".".to_string()]
    } else {
        opts.packages.clone()
    };

    tracing::info!("resolving dependencies of {}", project.import_path());
    let roots = loader.load(&patterns)?;
    let mut manifest =
        Manifest::new(project.import_path(), go_version).with_packages(opts.packages.clone());
    manifest.deps = load_dependencies(&project, loader, &roots)?;

    carry_versions(&old, &mut manifest)?;
    manifest.sort_deps();

    let rewrite_paths = if opts.rewrite {
        manifest.import_paths()
    } else {
        Vec::new()
    };

    // Project sources are planned while the vendor tree is still untouched.
    let mut project_files: Vec<PathBuf> = roots
        .iter()
        .filter(|p| !p.standard && p.error_message().is_none())
        .flat_map(|p| p.source_files())
        .filter(|f| !project.is_vendored(f))
        .collect();
    project_files.sort();
    project_files.dedup();
    let project_plan =
        RewritePlan::for_files(&project_files, project.import_path(), &rewrite_paths)?;

    let vendor_src = project.vendor_src_dir();
    let removed = sub_deps(&old.deps, &manifest.deps);
    remove_src(&vendor_src, &removed)?;
    copy_src(&vendor_src, &manifest.deps)?;
    write_vcs_ignore(&project.vendor_workspace());

    let vendor_files = if vendor_src.is_dir() {
        go_files(&vendor_src)?
    } else {
        Vec::new()
    };
    let vendor_plan =
        RewritePlan::for_files(&vendor_files, project.import_path(), &rewrite_paths)?;

    let rewritten = project_plan.apply()? + vendor_plan.apply()?;

    let manifest_path = project.manifest_path();
    manifest.save(&manifest_path)?;

    Ok(SaveReport {
        manifest,
        manifest_path,
        removed,
        rewritten,
    })
}
