//! Project manifest model and rewrite
//!
//! Reads and writes `package.json`, exposing the dependency blocks the
//! downgrade rewrite touches as typed maps while passing every other field
//! through untouched and in order.

pub mod minimize;

use crate::core::error::{DowngradeError, Result};
use crate::core::types::DependencyMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// File name of the project manifest
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// A parsed project manifest.
///
/// Only the fields the downgrade rewrite cares about are typed; everything
/// else survives in `extra` with its original order and values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageManifest {
    /// Declared project version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Runtime dependency ranges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,

    /// Development dependency ranges
    #[serde(rename = "devDependencies", skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,

    /// Peer dependency ranges
    #[serde(rename = "peerDependencies", skip_serializing_if = "Option::is_none")]
    pub peer_dependencies: Option<DependencyMap>,

    /// Version overrides forced onto the whole install tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<DependencyMap>,

    /// Every other manifest field, passed through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Load the manifest from `<dir>/package.json`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DowngradeError::manifest_not_found(path));
            },
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    /// Write the manifest to `<dir>/package.json`
    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_manifest() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let err = PackageManifest::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DowngradeError::ManifestNotFound { .. }));

        Ok(())
    }

    #[test]
    fn test_load_save_round_trip_preserves_extra_fields() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let text = r#"{
            "name": "fixture",
            "version": "1.0.0",
            "main": "index.js",
            "dependencies": {"b": "^2.0.0", "a": "^1.0.0"},
            "scripts": {"test": "node test.js"}
        }"#;
        fs::write(temp_dir.path().join(MANIFEST_FILE_NAME), text)?;

        let manifest = PackageManifest::load(temp_dir.path())?;

        assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
        let deps = manifest.dependencies.as_ref().unwrap();
        // Declaration order survives parsing.
        let keys: Vec<&String> = deps.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(manifest.extra["name"], "fixture");
        assert_eq!(manifest.extra["main"], "index.js");

        let out_dir = TempDir::new()?;
        manifest.save(out_dir.path())?;
        let reloaded = PackageManifest::load(out_dir.path())?;

        assert_eq!(reloaded.extra["scripts"]["test"], "node test.js");
        let keys: Vec<&String> = reloaded.dependencies.as_ref().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);

        Ok(())
    }
}
