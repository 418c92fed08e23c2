//! CLI command implementations

pub mod completion;
pub mod list;
pub mod manifest;
pub mod run;

// Common utilities for commands
use crate::manifest::MANIFEST_FILE_NAME;
use anyhow::Result;
use std::path::PathBuf;

/// Resolve the project root.
///
/// An explicit `--dir` is trusted as-is; otherwise walk upward from the
/// current directory until a `package.json` is found.
pub fn resolve_project_root(dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dunce::canonicalize(&dir)?);
    }

    let mut current_dir = std::env::current_dir()?;
    loop {
        if current_dir.join(MANIFEST_FILE_NAME).exists() {
            return Ok(current_dir);
        }

        if let Some(parent) = current_dir.parent() {
            current_dir = parent.to_path_buf();
        } else {
            break;
        }
    }

    Err(anyhow::anyhow!(
        "Not in an npm project (no {} found in any parent directory)",
        MANIFEST_FILE_NAME
    ))
}
