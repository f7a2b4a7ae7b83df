//! Dependency resolution.
//!
//! Turns the packages a project imports into a list of repository-pinned
//! dependencies, then reconciles that list with the saved manifest.
//! Everything here runs before any file is written.

pub mod errors;
pub mod reconcile;
pub mod resolve;

pub use errors::ResolveError;
pub use reconcile::{bad_sandbox_vcs, carry_versions, check_sandbox_vcs, sub_deps};
pub use resolve::load_dependencies;
