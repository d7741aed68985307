//! Deterministic renderers for build failures and reports.

#![forbid(unsafe_code)]

mod failure;
mod markdown;

pub use failure::{render_failure, render_summary_lines};
pub use markdown::render_markdown;
