//! Package sources.
//!
//! A loader answers "which packages match these patterns, where do they
//! live, and what do they import".

pub mod go_list;
pub mod source;

pub use go_list::GoListLoader;
pub use source::PackageLoader;
