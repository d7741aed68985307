//! Property-based tests for the analyzer.
//!
//! These tests use proptest to verify invariants around:
//! - Single-version packages never producing errors
//! - Membership independence from input order
//! - Exception accounting

use crate::policy::{Exception, ExceptionPolicy};
use crate::{analyze, verdict};
use doppel_types::{PackageIdentity, PackagePath, Verdict};
use proptest::prelude::*;

/// Strategy for valid npm-style package names.
fn arb_package_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}")
        .unwrap()
        .prop_filter("name must not be empty", |s| !s.is_empty())
}

/// Strategy for plain semver version strings.
fn arb_version() -> impl Strategy<Value = String> {
    (0u32..20, 0u32..20, 0u32..20).prop_map(|(major, minor, patch)| {
        format!("{}.{}.{}", major, minor, patch)
    })
}

fn arb_identity() -> impl Strategy<Value = PackageIdentity> {
    (arb_package_name(), arb_version(), 0usize..4).prop_map(|(name, version, depth)| {
        let mut root = format!("/app/node_modules/{name}");
        for i in 0..depth {
            root = format!("/app/node_modules/host{i}{}", root.trim_start_matches("/app"));
        }
        PackageIdentity::new(name, version, PackagePath::new(root))
    })
}

proptest! {
    #[test]
    fn single_version_packages_never_error(name in arb_package_name(), version in arb_version(), roots in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let identities: Vec<PackageIdentity> = roots
            .iter()
            .map(|r| PackageIdentity::new(
                name.clone(),
                version.clone(),
                PackagePath::new(format!("/app/node_modules/{r}/node_modules/{name}")),
            ))
            .collect();

        let report = analyze(identities, &ExceptionPolicy::new());
        prop_assert!(report.duplicate_package_errors.is_empty());
        prop_assert_eq!(verdict(&report), Verdict::Pass);
    }

    #[test]
    fn membership_is_order_independent(mut identities in prop::collection::vec(arb_identity(), 0..24)) {
        let forward = analyze(identities.clone(), &ExceptionPolicy::new());
        identities.reverse();
        let backward = analyze(identities, &ExceptionPolicy::new());

        let mut fwd = forward.duplicate_package_errors.clone();
        let mut bwd = backward.duplicate_package_errors.clone();
        fwd.sort_by(|a, b| a.package.cmp(&b.package));
        bwd.sort_by(|a, b| a.package.cmp(&b.package));

        prop_assert_eq!(fwd, bwd);
        prop_assert_eq!(forward.unused_exceptions, backward.unused_exceptions);
    }

    #[test]
    fn unseen_exceptions_are_always_unused(identities in prop::collection::vec(arb_identity(), 0..16)) {
        let mut exceptions = ExceptionPolicy::new();
        // `zz-never-published` cannot be produced by arb_package_name (length).
        exceptions.insert("zz-never-published-package", Exception::new(4));

        let report = analyze(identities, &exceptions);
        prop_assert!(report.unused_exceptions.contains("zz-never-published-package"));
        prop_assert_eq!(verdict(&report), Verdict::Fail);
    }

    #[test]
    fn errors_always_carry_at_least_two_versions(identities in prop::collection::vec(arb_identity(), 0..32)) {
        let report = analyze(identities, &ExceptionPolicy::new());
        for err in &report.duplicate_package_errors {
            prop_assert!(err.versions.len() >= 2);
        }
    }
}
