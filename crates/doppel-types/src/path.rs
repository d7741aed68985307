use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical separator-normalized path used in identities and reports.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no trailing slash (a bare `/` root is preserved)
///
/// Every cross-component comparison, containment check, and redirect rewrite
/// goes through this type so Windows and Unix inputs compare equal.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PackagePath(String);

impl PackagePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.len() > 1 && v.ends_with('/') {
            v.pop();
        }
        // Avoid empty path; keep it explicit.
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    pub fn join(&self, segment: &str) -> PackagePath {
        let base = Utf8Path::new(self.as_str());
        PackagePath::new(base.join(segment).as_str())
    }

    /// Parent directory, or `None` at a filesystem root.
    pub fn parent(&self) -> Option<PackagePath> {
        let parent = Utf8Path::new(self.as_str()).parent()?;
        if parent.as_str().is_empty() {
            return None;
        }
        Some(PackagePath::new(parent.as_str()))
    }

    /// True if any path segment equals `name` (e.g. `node_modules`).
    pub fn has_segment(&self, name: &str) -> bool {
        self.0.split('/').any(|seg| seg == name)
    }

    /// Subpath of `self` below `root`, split on a segment boundary.
    ///
    /// Returns `Some("")` when the paths are equal. A textual prefix that is
    /// not an ancestor (`/a/pkg` vs `/a/pkgx/f.js`) returns `None`, which is
    /// the whole point of doing this structurally instead of by substring.
    pub fn strip_root(&self, root: &PackagePath) -> Option<&str> {
        if self == root {
            return Some("");
        }
        let rest = self.0.strip_prefix(root.as_str())?;
        rest.strip_prefix('/')
    }
}

impl From<&Utf8Path> for PackagePath {
    fn from(value: &Utf8Path) -> Self {
        PackagePath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for PackagePath {
    fn from(value: Utf8PathBuf) -> Self {
        PackagePath::new(value.as_str())
    }
}

impl std::fmt::Display for PackagePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
