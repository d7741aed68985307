use crate::PackagePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Stable schema identifier for the emitted report envelope.
pub const SCHEMA_REPORT_V1: &str = "doppel.report.v1";

/// Gate outcome. Intentionally binary: duplicates either halt the build or
/// they do not; graded severities would blur the exception policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// One package whose distinct-version count exceeded its allowed threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DuplicatePackageError {
    pub package: String,
    /// All distinct versions observed for this package (at least two).
    pub versions: BTreeSet<String>,
    /// Configured threshold, if an exception existed but was still exceeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_versions: Option<u32>,
}

/// Structured output of the duplicate analyzer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// One entry per violating package, in first-seen package-name order.
    pub duplicate_package_errors: Vec<DuplicatePackageError>,
    /// Configured exceptions that never matched an actual duplication.
    pub unused_exceptions: BTreeSet<String>,
}

impl AnalysisReport {
    pub fn has_issues(&self) -> bool {
        !self.duplicate_package_errors.is_empty() || !self.unused_exceptions.is_empty()
    }
}

/// Per-identity doppelganger outcome for the post-build summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DoppelgangerSummary {
    pub package: String,
    pub version: String,
    pub canonical_root: PackagePath,
    /// Every root observed for this `name@version`, canonical included.
    pub observed_roots: BTreeSet<PackagePath>,
}

impl DoppelgangerSummary {
    /// Redundant copies collapsed into the canonical root.
    pub fn eliminated(&self) -> usize {
        self.observed_roots.len().saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run-level counters carried alongside the analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DoppelData {
    /// `build` or `dev`.
    pub mode: String,
    pub modules_seen: u32,
    pub packages_seen: u32,
}

/// The emitted report envelope (`doppel.report.v1`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DoppelReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    /// Same bit as `verdict`, exposed as a boolean for interactive
    /// consumers that only branch on it.
    pub has_issues: bool,
    pub analysis: AnalysisReport,
    /// Identities with more than one observed root (empty when deduplication
    /// is disabled or no doppelgangers existed).
    pub doppelgangers: Vec<DoppelgangerSummary>,
    pub data: DoppelData,
}
