//! List command implementation

use crate::cli::commands::resolve_project_root;
use crate::config::Config;
use crate::ignore::walker::TreeWalker;
use crate::snapshot;
use anyhow::Result;
use std::path::PathBuf;

/// Execute the list command: print the files a snapshot would contain
pub fn execute(dir: Option<PathBuf>, json: bool) -> Result<()> {
    let root = resolve_project_root(dir)?;
    let config = Config::load(&root)?;
    let skip = &config.snapshot.skip;
    let walker = TreeWalker::new(&root)?;

    if json {
        let files: Vec<String> = walker
            .walk()?
            .filter(|path| !snapshot::is_skipped_name(path, skip))
            .map(|path| path.display().to_string())
            .collect();
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        for path in walker.walk()? {
            if !snapshot::is_skipped_name(&path, skip) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
