//! Manifest command implementation

use crate::cli::commands::resolve_project_root;
use crate::manifest::{minimize, PackageManifest};
use anyhow::Result;
use std::path::PathBuf;

/// Execute the manifest command: print the downgraded manifest
pub fn execute(dir: Option<PathBuf>) -> Result<()> {
    let root = resolve_project_root(dir)?;
    let manifest = PackageManifest::load(&root)?;
    let downgraded = minimize::downgrade(&manifest)?;

    println!("{}", serde_json::to_string_pretty(&downgraded)?);

    Ok(())
}
