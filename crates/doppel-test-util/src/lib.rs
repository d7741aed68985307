//! Shared test utilities for the doppel workspace.
//!
//! Builds throwaway `node_modules` trees with real `package.json` files so
//! tests can exercise the filesystem manifest source, and normalizes
//! non-deterministic report JSON for golden-file comparison.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// A temporary project tree with a `node_modules` hierarchy.
///
/// Dropping the tree deletes it.
pub struct FixtureTree {
    tmp: TempDir,
    root: Utf8PathBuf,
}

impl FixtureTree {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 temp path");
        Self { tmp, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Install a fake package at `rel_root` (e.g. `node_modules/react`) with
    /// the given name/version manifest and an empty entry module. Returns the
    /// absolute path to the entry module.
    pub fn install_package(&self, rel_root: &str, name: &str, version: &str) -> Utf8PathBuf {
        let pkg_root = self.root.join(rel_root);
        std::fs::create_dir_all(&pkg_root).expect("create package root");
        std::fs::write(
            pkg_root.join("package.json"),
            format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
        )
        .expect("write package.json");

        let entry = pkg_root.join("index.js");
        std::fs::write(&entry, "module.exports = {};\n").expect("write entry");
        entry
    }

    /// Write an arbitrary file relative to the tree root.
    pub fn write_file(&self, rel_path: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, contents).expect("write file");
        path
    }

    /// Keep the TempDir alive even if callers only hold paths.
    pub fn into_parts(self) -> (TempDir, Utf8PathBuf) {
        (self.tmp, self.root)
    }
}

impl Default for FixtureTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize non-deterministic report JSON fields for stable comparison.
///
/// `tool.version` is replaced only when the root object looks like a report
/// envelope (has `schema`, `tool`, `verdict`, `analysis`); timestamp keys are
/// normalized at any depth because their placeholder values cannot collide
/// with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("analysis");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
