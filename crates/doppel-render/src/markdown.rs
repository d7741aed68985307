use doppel_types::{DoppelReport, Verdict};

pub fn render_markdown(report: &DoppelReport) -> String {
    let mut out = String::new();

    out.push_str("# Doppel report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Mode: {}\n- Modules: {} / Packages: {}\n\n",
        verdict, report.data.mode, report.data.modules_seen, report.data.packages_seen
    ));

    if report.analysis.duplicate_package_errors.is_empty()
        && report.analysis.unused_exceptions.is_empty()
        && report.doppelgangers.is_empty()
    {
        out.push_str("No duplicate packages.\n");
        return out;
    }

    if !report.analysis.duplicate_package_errors.is_empty() {
        out.push_str("## Duplicate versions\n\n");
        for err in &report.analysis.duplicate_package_errors {
            let versions: Vec<&str> = err.versions.iter().map(String::as_str).collect();
            match err.max_versions {
                Some(allowed) => out.push_str(&format!(
                    "- `{}` — {} (allowed: {})\n",
                    err.package,
                    versions.join(", "),
                    allowed
                )),
                None => out.push_str(&format!("- `{}` — {}\n", err.package, versions.join(", "))),
            }
        }
        out.push('\n');
    }

    if !report.analysis.unused_exceptions.is_empty() {
        out.push_str("## Unused exceptions\n\n");
        for package in &report.analysis.unused_exceptions {
            out.push_str(&format!("- `{}`\n", package));
        }
        out.push('\n');
    }

    if !report.doppelgangers.is_empty() {
        out.push_str("## Doppelgangers eliminated\n\n");
        for s in &report.doppelgangers {
            out.push_str(&format!(
                "- `{}@{}` — {} redundant copies (canonical `{}`)\n",
                s.package,
                s.version,
                s.eliminated(),
                s.canonical_root
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppel_types::{
        AnalysisReport, DoppelData, DoppelgangerSummary, DuplicatePackageError, PackagePath,
        ToolMeta, SCHEMA_REPORT_V1,
    };
    use std::collections::BTreeSet;
    use time::OffsetDateTime;

    fn report(analysis: AnalysisReport, doppelgangers: Vec<DoppelgangerSummary>) -> DoppelReport {
        let verdict = if analysis.has_issues() {
            Verdict::Fail
        } else {
            Verdict::Pass
        };
        DoppelReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "doppel".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            verdict,
            has_issues: analysis.has_issues(),
            analysis,
            doppelgangers,
            data: DoppelData {
                mode: "build".to_string(),
                modules_seen: 3,
                packages_seen: 2,
            },
        }
    }

    #[test]
    fn renders_clean_report() {
        let md = render_markdown(&report(AnalysisReport::default(), Vec::new()));
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("No duplicate packages."));
    }

    #[test]
    fn renders_all_sections() {
        let analysis = AnalysisReport {
            duplicate_package_errors: vec![DuplicatePackageError {
                package: "react".to_string(),
                versions: BTreeSet::from(["17.0.2".to_string(), "18.2.0".to_string()]),
                max_versions: Some(1),
            }],
            unused_exceptions: BTreeSet::from(["lodash".to_string()]),
        };
        let doppelgangers = vec![DoppelgangerSummary {
            package: "tslib".to_string(),
            version: "2.6.2".to_string(),
            canonical_root: PackagePath::new("/n/tslib"),
            observed_roots: BTreeSet::from([
                PackagePath::new("/n/tslib"),
                PackagePath::new("/n/a/node_modules/tslib"),
            ]),
        }];

        let md = render_markdown(&report(analysis, doppelgangers));
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("## Duplicate versions"));
        assert!(md.contains("`react` — 17.0.2, 18.2.0 (allowed: 1)"));
        assert!(md.contains("## Unused exceptions"));
        assert!(md.contains("`lodash`"));
        assert!(md.contains("## Doppelgangers eliminated"));
        assert!(md.contains("`tslib@2.6.2`"));
    }
}
