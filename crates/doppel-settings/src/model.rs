use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `doppel.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DoppelConfigV1 {
    /// Optional schema string for tooling (`doppel.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Redirect exact-version doppelgangers to one canonical copy at
    /// resolution time. Off by default: redirection changes which on-disk
    /// copy imports are wired to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduplicate_doppelgangers: Option<bool>,

    /// `build` (one-shot, fatal gate at the end) or `dev` (long-running,
    /// on-demand non-fatal snapshots).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Map of package name -> exception config.
    #[serde(default)]
    pub exceptions: BTreeMap<String, ExceptionConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExceptionConfig {
    /// How many distinct versions of this package may coexist. Must be >= 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<u32>,
}
