use std::collections::BTreeMap;

/// Configured tolerance for one package: up to `max_versions` distinct
/// versions may coexist without failing the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exception {
    pub max_versions: u32,
}

impl Exception {
    pub fn new(max_versions: u32) -> Self {
        Self { max_versions }
    }
}

/// Map of package name to exception. Immutable for the duration of a run.
///
/// Every key must end up matching a package that was actually duplicated,
/// otherwise the analyzer reports it as an unused exception: stale entries
/// mask future real regressions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionPolicy {
    entries: BTreeMap<String, Exception>,
}

impl ExceptionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: impl Into<String>, exception: Exception) {
        self.entries.insert(package.into(), exception);
    }

    pub fn get(&self, package: &str) -> Option<&Exception> {
        self.entries.get(package)
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Exception)> for ExceptionPolicy {
    fn from_iter<T: IntoIterator<Item = (String, Exception)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
