//! Owning-package resolution: map a file path back to the package that owns it.
//!
//! The search climbs ancestor directories looking for the nearest `package.json`.
//! Reads go through the [`ManifestSource`] trait so the host's filesystem
//! primitive can be swapped for an in-memory map in tests.

#![forbid(unsafe_code)]

mod resolve;
mod source;

pub use resolve::{is_dependency_path, locate_owning_package, MANIFEST_FILE, MAX_CLIMB};
pub use source::{FsManifestSource, ManifestSource};
