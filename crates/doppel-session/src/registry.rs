use dashmap::DashMap;
use doppel_types::{DoppelgangerSummary, PackageIdentity, PackagePath};
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    version: String,
    canonical_root: PackagePath,
    observed_roots: BTreeSet<PackagePath>,
}

/// Session-scoped table mapping `name@version` to its canonical root and
/// every root observed for that identity.
///
/// Canonical is whichever root was resolved *first* during this run. This is
/// order-dependent on purpose: the host controls resolution order, and within
/// one run the winner stays fixed. There is no "best copy" preference
/// (shallowest nesting, lexicographic, etc.), and none should be added.
///
/// Resolution calls arrive concurrently; the sharded map's per-key entry
/// lock guarantees that two simultaneous first occurrences of the same
/// identity elect exactly one canonical root.
#[derive(Debug, Default)]
pub struct DoppelgangerRegistry {
    entries: DashMap<String, Entry>,
}

impl DoppelgangerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical root for `identity`, registering the root as observed.
    ///
    /// First occurrence of a `name@version`: the identity's own root becomes
    /// canonical and is returned unchanged. Later occurrences with a
    /// different root grow the observed set and are redirected to the
    /// canonical root.
    pub fn canonicalize(&self, identity: &PackageIdentity) -> PackagePath {
        let mut entry = self
            .entries
            .entry(identity.key())
            .or_insert_with(|| Entry {
                name: identity.name.clone(),
                version: identity.version.clone(),
                canonical_root: identity.root.clone(),
                observed_roots: BTreeSet::from([identity.root.clone()]),
            });

        if entry.canonical_root != identity.root {
            entry.observed_roots.insert(identity.root.clone());
        }
        entry.canonical_root.clone()
    }

    /// Identities that actually had redundant copies (more than one observed
    /// root), sorted by `name@version` for stable output.
    pub fn summary(&self) -> Vec<DoppelgangerSummary> {
        let mut out: Vec<DoppelgangerSummary> = self
            .entries
            .iter()
            .filter(|e| e.observed_roots.len() > 1)
            .map(|e| DoppelgangerSummary {
                package: e.name.clone(),
                version: e.version.clone(),
                canonical_root: e.canonical_root.clone(),
                observed_roots: e.observed_roots.clone(),
            })
            .collect();
        out.sort_by(|a, b| (&a.package, &a.version).cmp(&(&b.package, &b.version)));
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
