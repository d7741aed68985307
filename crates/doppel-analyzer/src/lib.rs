//! Pure duplicate analysis (no IO).
//!
//! Input: package identities collected elsewhere.
//! Output: duplicate-version errors + unused exceptions + verdict.

#![forbid(unsafe_code)]

pub mod policy;

mod analyze;

pub use analyze::{analyze, verdict};
pub use policy::{Exception, ExceptionPolicy};

#[cfg(test)]
mod proptest;
