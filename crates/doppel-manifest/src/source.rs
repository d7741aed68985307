use doppel_types::PackagePath;

/// Host-provided filesystem primitive: read a manifest file from a directory.
///
/// Absence and unreadability are the same case (`None`); a failed read is a
/// terminal not-found for that lookup, never a retryable error.
pub trait ManifestSource {
    fn read_manifest(&self, dir: &PackagePath) -> Option<String>;
}

/// Default source backed by the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsManifestSource;

impl ManifestSource for FsManifestSource {
    fn read_manifest(&self, dir: &PackagePath) -> Option<String> {
        let path = dir.to_utf8_pathbuf().join(crate::MANIFEST_FILE);
        std::fs::read_to_string(path).ok()
    }
}

impl<T: ManifestSource + ?Sized> ManifestSource for &T {
    fn read_manifest(&self, dir: &PackagePath) -> Option<String> {
        (**self).read_manifest(dir)
    }
}
