use doppel_types::{AnalysisReport, DoppelgangerSummary};

/// Render the fatal, build-halting failure message.
///
/// Both failure categories render into one combined message so the operator
/// sees the complete picture in a single failure. Versions are already
/// sorted (set order) and packages follow the report's stable order, so the
/// output is deterministic for identical reports.
pub fn render_failure(report: &AnalysisReport) -> String {
    let mut out = String::new();

    if !report.duplicate_package_errors.is_empty() {
        out.push_str("duplicate packages found in the bundle:\n");
        for err in &report.duplicate_package_errors {
            let versions: Vec<&str> = err.versions.iter().map(String::as_str).collect();
            match err.max_versions {
                Some(allowed) => out.push_str(&format!(
                    "  {}: {} versions ({}), {} allowed by exception\n",
                    err.package,
                    err.versions.len(),
                    versions.join(", "),
                    allowed
                )),
                None => out.push_str(&format!(
                    "  {}: {} versions ({})\n",
                    err.package,
                    err.versions.len(),
                    versions.join(", ")
                )),
            }
        }
    }

    if !report.unused_exceptions.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("unused exceptions (no matching duplication exists):\n");
        for package in &report.unused_exceptions {
            out.push_str(&format!("  {}\n", package));
        }
    }

    out
}

/// Informational post-build lines, one per identity that had redundant
/// copies eliminated.
pub fn render_summary_lines(summaries: &[DoppelgangerSummary]) -> Vec<String> {
    summaries
        .iter()
        .filter(|s| s.eliminated() > 0)
        .map(|s| {
            let copies = if s.eliminated() == 1 { "copy" } else { "copies" };
            format!(
                "{}@{}: eliminated {} redundant {} (canonical: {})",
                s.package,
                s.version,
                s.eliminated(),
                copies,
                s.canonical_root
            )
        })
        .collect()
}
