use crate::registry::DoppelgangerRegistry;
use dashmap::{DashMap, DashSet};
use doppel_types::{DoppelgangerSummary, PackageIdentity, PackagePath};
use doppel_manifest::{is_dependency_path, locate_owning_package, ManifestSource};
use std::collections::BTreeSet;

/// How long-lived the session is, decided once at construction.
///
/// A one-shot build gets a single fatal gate at the end; an interactive
/// session gets on-demand, non-fatal snapshots instead, because its module
/// set is inherently partial and growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    OneShotBuild,
    InteractiveSession,
}

impl SessionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::OneShotBuild => "build",
            SessionMode::InteractiveSession => "dev",
        }
    }
}

/// Shared mutable state for one build or dev-server lifetime.
///
/// Constructed explicitly and passed by reference to every resolution call;
/// discarded at teardown. Never reused across independent builds.
#[derive(Debug)]
pub struct BuildSession {
    mode: SessionMode,
    deduplicate: bool,
    registry: DoppelgangerRegistry,
    /// Absolute paths confirmed resolved during this session. Append-only
    /// while collecting; iterated when a report is requested.
    modules: DashSet<PackagePath>,
    /// Path -> identity memo. Manifests are immutable for the session, so
    /// no invalidation is needed; the cache dies with the session.
    identity_cache: DashMap<PackagePath, Option<PackageIdentity>>,
}

impl BuildSession {
    pub fn new(mode: SessionMode, deduplicate: bool) -> Self {
        Self {
            mode,
            deduplicate,
            registry: DoppelgangerRegistry::new(),
            modules: DashSet::new(),
            identity_cache: DashMap::new(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn deduplicate_enabled(&self) -> bool {
        self.deduplicate
    }

    pub fn registry(&self) -> &DoppelgangerRegistry {
        &self.registry
    }

    /// Record a path that made it into the build (or was resolved live).
    pub fn record_module(&self, path: PackagePath) {
        self.modules.insert(path);
    }

    /// Merge the host's own module graph into the session's set. In dev mode
    /// modules are added and evicted outside our observation, so the set is
    /// re-derived from the host at query time.
    pub fn merge_modules(&self, paths: impl IntoIterator<Item = PackagePath>) {
        for path in paths {
            self.modules.insert(path);
        }
    }

    /// Sorted snapshot of every recorded module path.
    pub fn module_snapshot(&self) -> BTreeSet<PackagePath> {
        self.modules.iter().map(|p| p.key().clone()).collect()
    }

    pub fn modules_seen(&self) -> usize {
        self.modules.len()
    }

    /// Memoized owning-package lookup. The cache only short-circuits repeat
    /// lookups; it cannot change which root wins canonical, since the value
    /// cached for a path is always the same identity the resolver returns.
    pub fn lookup_identity<S: ManifestSource>(
        &self,
        source: S,
        path: &PackagePath,
    ) -> Option<PackageIdentity> {
        if let Some(hit) = self.identity_cache.get(path) {
            return hit.clone();
        }
        let identity = locate_owning_package(source, path);
        self.identity_cache.insert(path.clone(), identity.clone());
        identity
    }

    /// Resolve recorded module paths to package identities for analysis.
    ///
    /// Paths outside a dependency-storage directory and paths whose owning
    /// manifest cannot be found contribute nothing; both are expected and
    /// silently skipped.
    pub fn collect_identities<S: ManifestSource + Copy>(&self, source: S) -> Vec<PackageIdentity> {
        self.module_snapshot()
            .iter()
            .filter(|path| is_dependency_path(path))
            .filter_map(|path| self.lookup_identity(source, path))
            .collect()
    }

    pub fn doppelganger_summaries(&self) -> Vec<DoppelgangerSummary> {
        self.registry.summary()
    }
}
