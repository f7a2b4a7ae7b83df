//! Core data structures for Deppy.
//!
//! This module contains the foundational types used throughout Deppy:
//! - Packages as reported by the Go toolchain
//! - Dependencies pinned to a VCS revision
//! - The `Deps/Deps.json` manifest
//! - Project layout (manifest and vendor workspace locations)

pub mod dependency;
pub mod manifest;
pub mod package;
pub mod workspace;

pub use dependency::Dependency;
pub use manifest::Manifest;
pub use package::Package;
pub use workspace::{
    Project, DEPS_DIR, MANIFEST_NAME, VENDOR_SEP, VENDOR_SRC_DIR, VENDOR_WORKSPACE_DIR,
};
