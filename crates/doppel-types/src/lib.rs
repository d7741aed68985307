//! Stable DTOs shared across the doppel workspace.
//!
//! This crate is intentionally boring:
//! - package identity and separator-normalized path handling
//! - data types for the analysis report and the emitted report envelope
//! - stable schema identifiers

#![forbid(unsafe_code)]

pub mod identity;
pub mod path;
pub mod report;

pub use identity::PackageIdentity;
pub use path::PackagePath;
pub use report::{
    AnalysisReport, DoppelData, DoppelReport, DoppelgangerSummary, DuplicatePackageError,
    ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
