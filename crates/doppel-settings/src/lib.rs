//! Config parsing and option resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration
//! provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{DoppelConfigV1, ExceptionConfig};
pub use resolve::{Overrides, ResolvedOptions};

/// Parse `doppel.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DoppelConfigV1> {
    let cfg: DoppelConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective options used by a session (file config + overrides).
pub fn resolve_config(cfg: DoppelConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedOptions> {
    resolve::resolve_config(cfg, overrides)
}
