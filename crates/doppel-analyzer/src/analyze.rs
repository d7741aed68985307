use crate::policy::ExceptionPolicy;
use doppel_types::{AnalysisReport, DuplicatePackageError, PackageIdentity, Verdict};
use std::collections::{BTreeMap, BTreeSet};

/// Analyze a collection of resolved package identities against the exception
/// policy.
///
/// Deterministic given identical inputs: iteration order affects only the
/// order of `duplicate_package_errors` (first-seen package-name order, for
/// reproducible messages), never membership.
pub fn analyze(
    identities: impl IntoIterator<Item = PackageIdentity>,
    exceptions: &ExceptionPolicy,
) -> AnalysisReport {
    // Package name -> distinct versions observed, plus first-seen name order.
    let mut versions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut name_order: Vec<String> = Vec::new();

    for identity in identities {
        let entry = versions.entry(identity.name.clone()).or_insert_with(|| {
            name_order.push(identity.name.clone());
            BTreeSet::new()
        });
        entry.insert(identity.version);
    }

    let mut errors: Vec<DuplicatePackageError> = Vec::new();
    for name in &name_order {
        let observed = &versions[name];
        if observed.len() <= 1 {
            continue;
        }

        let exception = exceptions.get(name);
        let allowed = exception.map(|e| e.max_versions).unwrap_or(1);
        if observed.len() as u32 > allowed {
            errors.push(DuplicatePackageError {
                package: name.clone(),
                versions: observed.clone(),
                max_versions: exception.map(|e| e.max_versions),
            });
        }
    }

    // An exception is exercised only by a package that was actually seen
    // with more than one version. A package seen with exactly one version
    // and a package never seen at all are the same defect: configuration
    // for a problem that does not exist.
    let unused_exceptions = exceptions
        .packages()
        .filter(|name| versions.get(*name).map(|v| v.len()).unwrap_or(0) <= 1)
        .map(str::to_string)
        .collect();

    AnalysisReport {
        duplicate_package_errors: errors,
        unused_exceptions,
    }
}

/// Gate decision for an end-of-build report.
pub fn verdict(report: &AnalysisReport) -> Verdict {
    if report.has_issues() {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}
