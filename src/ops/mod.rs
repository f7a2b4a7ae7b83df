//! High-level operations.
//!
//! This module contains the implementation of Deppy commands.

pub mod deppy_go;
pub mod deppy_save;
pub mod vendor;

pub use deppy_go::{go_command, run_go, sandbox_gopath, workspace_path};
pub use deppy_save::{save, SaveOptions, SaveReport};
pub use vendor::{copy_src, remove_src, write_vcs_ignore, CopyError};
