//! Run command implementation

use crate::cli::commands::resolve_project_root;
use crate::config::Config;
use crate::manifest::{minimize, PackageManifest};
use crate::runner::{self, ReentrancyGuard};
use crate::snapshot;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Execute the run command: snapshot, downgrade, install, build
pub fn execute(
    dir: Option<PathBuf>,
    args: Vec<String>,
    keep: bool,
    quiet: bool,
    no_progress: bool,
    guard: &ReentrancyGuard,
) -> Result<()> {
    if guard.is_nested() {
        // This process is the build running inside a scratch fixture;
        // recursing into another snapshot cycle would never terminate.
        return Ok(());
    }

    let root = resolve_project_root(dir)?;
    let config = Config::load(&root)?;

    // Resolve every dependency floor before touching the filesystem; a
    // range without a computable minimum aborts the whole operation.
    let manifest = PackageManifest::load(&root)?;
    let downgraded = minimize::downgrade(&manifest)?;

    let scratch = snapshot::create_scratch_dir()?;
    if !quiet {
        println!("Working in: {}", scratch.path().display().to_string().cyan());
    }

    let progress = if quiet || no_progress {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Copying files...");
        Some(bar)
    };

    let report =
        snapshot::snapshot_project(&root, scratch.path(), &config.snapshot.skip, progress.as_ref())?;
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    if !quiet {
        println!(
            "  {} Copied {} files ({} skipped)",
            "•".cyan(),
            report.copied,
            report.skipped
        );
    }

    downgraded.save(scratch.path())?;
    if !quiet {
        println!(
            "  {} Wrote downgraded manifest (version {})",
            "•".cyan(),
            downgraded.version.as_deref().unwrap_or("?")
        );
    }

    let package_manager = &config.build.package_manager;
    runner::install(package_manager, scratch.path())?;
    runner::run_scripts(package_manager, scratch.path(), &args)?;

    if keep || config.build.keep_scratch {
        let path = scratch.into_path();
        println!(
            "{} Scratch directory kept at {}",
            "✓".green(),
            path.display()
        );
    }

    if !quiet {
        println!("{}", "✓ Downgraded build succeeded!".green());
    }

    Ok(())
}
