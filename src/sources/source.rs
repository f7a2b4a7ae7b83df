//! PackageLoader trait - common interface for package graph loaders.

use anyhow::Result;

use crate::core::Package;

/// A source of package metadata.
pub trait PackageLoader {
    /// Load the packages matching `patterns`.
    ///
    /// Patterns are import paths, `.`, relative directories or `...`
    /// wildcards. Packages that cannot be found are returned with their
    /// `Error` field set rather than failing the whole call.
    fn load(&self, patterns: &[String]) -> Result<Vec<Package>>;

    /// Abridged toolchain version, e.g. `go1.21.3`.
    fn toolchain_version(&self) -> Result<String>;
}
