//! Snapshot copy into a scratch directory
//!
//! Drives the tree walker and mirrors every non-excluded file into a
//! scratch directory, preserving relative structure. The copy is
//! best-effort: the goal is a representative build fixture, not a
//! bit-perfect backup, so individual failures are logged and counted
//! instead of aborting the pass.

use crate::core::error::Result;
use crate::ignore::walker::TreeWalker;
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Prefix of scratch directories created under the system temp dir
pub const SCRATCH_PREFIX: &str = "downgrade-build-";

/// Outcome of a snapshot copy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    /// Files copied into the scratch directory
    pub copied: usize,
    /// Files that could not be copied and were skipped
    pub skipped: usize,
}

/// Create a fresh scratch directory for one downgrade build
pub fn create_scratch_dir() -> Result<TempDir> {
    let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;
    Ok(dir)
}

/// Whether a relative path's file name is on the snapshot skip list
pub fn is_skipped_name(relative: &Path, skip: &[String]) -> bool {
    relative
        .file_name()
        .map(|name| skip.iter().any(|s| name == s.as_str()))
        .unwrap_or(false)
}

/// Copy the snapshot of `root` into `scratch`.
///
/// Files whose name appears in `skip` (lockfiles, regenerated by the
/// scratch install) are left out. Intermediate directories are created as
/// needed. Per-file copy failures are logged, counted and skipped.
pub fn snapshot_project(
    root: &Path,
    scratch: &Path,
    skip: &[String],
    progress: Option<&ProgressBar>,
) -> Result<SnapshotReport> {
    let walker = TreeWalker::new(root)?;
    let mut report = SnapshotReport::default();

    for relative in walker.walk()? {
        if is_skipped_name(&relative, skip) {
            continue;
        }

        if let Some(progress) = progress {
            progress.set_message(relative.display().to_string());
            progress.tick();
        }

        let source = walker.root().join(&relative);
        let target = scratch.join(&relative);

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "cannot create directory, skipping file");
                report.skipped += 1;
                continue;
            }
        }

        match fs::copy(&source, &target) {
            Ok(_) => report.copied += 1,
            Err(e) => {
                tracing::warn!(
                    source = %source.display(),
                    target = %target.display(),
                    error = %e,
                    "cannot copy file, skipping"
                );
                report.skipped += 1;
            },
        }
    }

    Ok(report)
}
