use crate::ManifestSource;
use doppel_types::{PackageIdentity, PackagePath};
use serde::Deserialize;

/// Manifest file name looked for at each ancestor level.
pub const MANIFEST_FILE: &str = "package.json";

/// Upper bound on ancestor levels visited per lookup. Guards against cyclic
/// symlinked directory structures; hitting the bound is a plain not-found.
pub const MAX_CLIMB: usize = 64;

/// Fields we care about from `package.json`. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// True if `path` lives under a dependency-storage directory.
///
/// First-party/workspace source is excluded from duplicate analysis; only
/// paths with a `node_modules` segment participate.
pub fn is_dependency_path(path: &PackagePath) -> bool {
    path.has_segment("node_modules")
}

/// Find the nearest ancestor package manifest that owns `path`.
///
/// Returns `None` when no manifest exists up to the filesystem root, when the
/// nearest manifest is unparseable, or when it lacks the fields needed to
/// form an identity. All of these are expected cases (virtual modules, paths
/// outside any package) and are deliberately silent.
///
/// A manifest with *neither* `name` nor `version` is a placeholder embedded
/// by some publishing tools, not a true package root: the search continues
/// one directory above it.
pub fn locate_owning_package<S: ManifestSource>(
    source: S,
    path: &PackagePath,
) -> Option<PackageIdentity> {
    let mut dir = Some(path.clone());
    let mut levels = 0;

    while let Some(current) = dir {
        if levels >= MAX_CLIMB {
            return None;
        }
        levels += 1;

        if let Some(text) = source.read_manifest(&current) {
            let Ok(raw) = serde_json::from_str::<RawManifest>(&text) else {
                // Unparseable is treated identically to absent: no
                // partial-trust parsing of a broken manifest.
                return None;
            };
            match (raw.name, raw.version) {
                (Some(name), Some(version)) => {
                    return Some(PackageIdentity::new(name, version, current));
                }
                (None, None) => {
                    // Placeholder manifest: keep climbing from its parent.
                }
                _ => {
                    // A real manifest that cannot form an identity. The file
                    // is owned, but by a package we cannot name; exclude it.
                    return None;
                }
            }
        }

        dir = current.parent();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsManifestSource;
    use std::collections::BTreeMap;

    /// In-memory manifest source keyed by directory path.
    struct MapSource(BTreeMap<&'static str, &'static str>);

    impl ManifestSource for MapSource {
        fn read_manifest(&self, dir: &PackagePath) -> Option<String> {
            self.0.get(dir.as_str()).map(|s| s.to_string())
        }
    }

    fn manifest(name: &str, version: &str) -> String {
        format!(r#"{{"name": "{name}", "version": "{version}"}}"#)
    }

    #[test]
    fn finds_nearest_ancestor_manifest() {
        let source = MapSource(BTreeMap::from([
            ("/app/node_modules/react", r#"{"name": "react", "version": "18.2.0"}"#),
            ("/app", r#"{"name": "app", "version": "1.0.0"}"#),
        ]));

        let id = locate_owning_package(
            &source,
            &PackagePath::new("/app/node_modules/react/cjs/react.production.js"),
        )
        .expect("identity");
        assert_eq!(id.name, "react");
        assert_eq!(id.version, "18.2.0");
        assert_eq!(id.root, PackagePath::new("/app/node_modules/react"));
    }

    #[test]
    fn no_manifest_up_to_root_is_none() {
        let source = MapSource(BTreeMap::new());
        assert!(locate_owning_package(&source, &PackagePath::new("/tmp/x/y.js")).is_none());
    }

    #[test]
    fn unparseable_manifest_is_none() {
        let source = MapSource(BTreeMap::from([(
            "/app/node_modules/broken",
            "{not json",
        )]));
        let result = locate_owning_package(
            &source,
            &PackagePath::new("/app/node_modules/broken/index.js"),
        );
        assert!(result.is_none());
    }

    #[test]
    fn placeholder_manifest_continues_climbing() {
        // Some publishing tools embed a {"type": "module"} stub deep inside
        // the package; the true root is above it.
        let source = MapSource(BTreeMap::from([
            ("/n/pkg/dist/esm", r#"{"type": "module"}"#),
            ("/n/pkg", r#"{"name": "pkg", "version": "2.0.0"}"#),
        ]));

        let id = locate_owning_package(&source, &PackagePath::new("/n/pkg/dist/esm/index.js"))
            .expect("identity");
        assert_eq!(id.root, PackagePath::new("/n/pkg"));
    }

    #[test]
    fn manifest_with_only_name_is_none() {
        let source = MapSource(BTreeMap::from([("/n/half", r#"{"name": "half"}"#)]));
        assert!(locate_owning_package(&source, &PackagePath::new("/n/half/a.js")).is_none());
    }

    #[test]
    fn climb_is_bounded() {
        // A source that always answers nothing but paths are deep enough to
        // exhaust the budget before the root.
        struct Never;
        impl ManifestSource for Never {
            fn read_manifest(&self, _dir: &PackagePath) -> Option<String> {
                None
            }
        }
        let deep = PackagePath::new(format!("/{}", vec!["d"; MAX_CLIMB + 8].join("/")));
        assert!(locate_owning_package(&Never, &deep).is_none());
    }

    #[test]
    fn is_dependency_path_requires_node_modules_segment() {
        assert!(is_dependency_path(&PackagePath::new(
            "/app/node_modules/react/index.js"
        )));
        assert!(!is_dependency_path(&PackagePath::new("/app/src/index.js")));
        assert!(!is_dependency_path(&PackagePath::new(
            "/app/node_modules_cache/react/index.js"
        )));
    }

    #[test]
    fn fs_source_reads_real_manifests() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = tmp.path().join("node_modules").join("left-pad");
        std::fs::create_dir_all(root.join("lib")).expect("create dirs");
        std::fs::write(root.join("package.json"), manifest("left-pad", "1.3.0"))
            .expect("write manifest");

        let file = PackagePath::new(root.join("lib").join("index.js").to_string_lossy());
        let id = locate_owning_package(FsManifestSource, &file).expect("identity");
        assert_eq!(id.name, "left-pad");
        assert_eq!(id.version, "1.3.0");
    }
}
