use crate::PackagePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One located package manifest: the package that owns a file on disk.
///
/// Two identities are the same package-version iff `name` and `version` are
/// equal. Equal name and version with a different `root` means the two are
/// doppelgangers of each other, not distinct packages.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
    /// Directory containing the package manifest.
    pub root: PackagePath,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>, root: PackagePath) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            root,
        }
    }

    /// Registry key for this identity: `name@version`.
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    pub fn same_package_version(&self, other: &PackageIdentity) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.root)
    }
}
