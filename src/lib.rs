//! Deppy - reproducible Go builds by vendoring pinned dependencies
//!
//! This crate provides the core library functionality for Deppy:
//! resolving a project's dependency closure to VCS revisions, reconciling
//! it with the saved manifest, copying dependency sources into the
//! project's private workspace, and rewriting import paths to use them.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod rewrite;
pub mod sources;
pub mod util;
pub mod vcs;

/// Test utilities and fixtures for Deppy unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides fixture trees, Go source generators, git
/// repository helpers and an in-memory package loader.
#[cfg(test)]
pub mod test_support;

pub use core::{
    dependency::Dependency, manifest::Manifest, package::Package, workspace::Project,
};

pub use resolver::ResolveError;
pub use util::context::GlobalContext;
pub use vcs::VcsKind;
