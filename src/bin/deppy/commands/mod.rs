//! Command implementations.

pub mod completions;
pub mod go;
pub mod path;
pub mod save;
