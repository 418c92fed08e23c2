//! Per-project configuration
//!
//! Optional `downgrade-build.toml` at the project root. A missing file
//! yields the defaults; a file that exists but does not parse is a
//! configuration error.

use crate::core::error::{DowngradeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// File name of the per-project configuration
pub const CONFIG_FILE_NAME: &str = "downgrade-build.toml";

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Build configuration
    pub build: BuildConfig,
    /// Snapshot configuration
    pub snapshot: SnapshotConfig,
}

/// Build step configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Package manager binary used for install and run
    pub package_manager: String,
    /// Keep the scratch directory after the build finishes
    pub keep_scratch: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            package_manager: "npm".to_string(),
            keep_scratch: false,
        }
    }
}

/// Snapshot step configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SnapshotConfig {
    /// File names excluded from the copy (lockfiles the scratch install
    /// regenerates)
    pub skip: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            skip: vec!["package-lock.json".to_string()],
        }
    }
}

impl Config {
    /// Load the configuration from `<root>/downgrade-build.toml`.
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| {
            DowngradeError::configuration_error(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))
        })
    }
}
