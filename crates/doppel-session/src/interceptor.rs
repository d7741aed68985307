use crate::session::BuildSession;
use doppel_manifest::{is_dependency_path, ManifestSource};
use doppel_types::PackagePath;

/// Reserved prefix the host uses for internal/virtual modules. Specifiers
/// carrying it are never ours to touch.
pub const VIRTUAL_PREFIX: char = '\0';

/// The host's own default module resolution.
pub trait HostResolver {
    fn resolve(&self, specifier: &str, importer: &str) -> Option<PackagePath>;
}

impl<F> HostResolver for F
where
    F: Fn(&str, &str) -> Option<PackagePath>,
{
    fn resolve(&self, specifier: &str, importer: &str) -> Option<PackagePath> {
        self(specifier, importer)
    }
}

/// Outcome of one intercepted resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Accept the host's resolution as-is.
    NotHandled,
    /// Use this path instead of the host's resolution.
    Redirect(PackagePath),
}

impl BuildSession {
    /// Intercept one module-specifier resolution.
    ///
    /// Every resolved dependency path is recorded for later analysis; a
    /// redirect is returned only when doppelganger deduplication is enabled
    /// and the resolved path belongs to a non-canonical copy of an
    /// already-seen `name@version`.
    ///
    /// The only side effects are registry and module-set mutation. Nothing
    /// is written to disk.
    pub fn intercept<S: ManifestSource>(
        &self,
        source: S,
        specifier: &str,
        importer: Option<&str>,
        host: &dyn HostResolver,
    ) -> Resolution {
        // Entry points have no importer; virtual modules belong to the host.
        let Some(importer) = importer else {
            return Resolution::NotHandled;
        };
        if specifier.starts_with(VIRTUAL_PREFIX) {
            return Resolution::NotHandled;
        }

        let Some(resolved) = host.resolve(specifier, importer) else {
            return Resolution::NotHandled;
        };
        if !is_dependency_path(&resolved) {
            // First-party source never participates in duplicate analysis.
            return Resolution::NotHandled;
        }

        let identity = self.lookup_identity(source, &resolved);

        // Recorded even when the owning manifest is missing: dev-mode
        // analysis still wants to see the path.
        self.record_module(resolved.clone());

        let Some(identity) = identity else {
            return Resolution::NotHandled;
        };

        if !self.deduplicate_enabled() {
            return Resolution::NotHandled;
        }

        let canonical = self.registry().canonicalize(&identity);
        if canonical == identity.root {
            return Resolution::NotHandled;
        }

        // Structured rewrite: keep the subpath within the package, swap the
        // package root. Never a textual substring replacement.
        match resolved.strip_root(&identity.root) {
            Some("") => Resolution::Redirect(canonical),
            Some(subpath) => Resolution::Redirect(canonical.join(subpath)),
            None => Resolution::NotHandled,
        }
    }
}
