//! External package-manager invocation
//!
//! The scratch fixture is handed to the package manager for an install and
//! a build/test run. This module is a thin process wrapper: it never
//! retries, and any non-success exit is surfaced as a fatal error naming
//! the command.

use crate::core::error::{DowngradeError, Result};
use std::env;
use std::path::Path;
use std::process::Command;

/// Environment flag marking a build spawned by this tool.
///
/// The build scripts of the project under test may invoke this tool again;
/// the flag lets that nested invocation short-circuit instead of recursing
/// into another snapshot-and-install cycle.
pub const NESTED_BUILD_ENV: &str = "POST_BUILD_TESTS";

/// Explicit re-entrancy context, read from the environment once at process
/// start and passed into the pipeline rather than consulted ambiently.
#[derive(Debug, Clone, Copy)]
pub struct ReentrancyGuard {
    nested: bool,
}

impl ReentrancyGuard {
    /// Capture the guard state from the process environment
    pub fn from_env() -> Self {
        Self {
            nested: env::var_os(NESTED_BUILD_ENV).is_some(),
        }
    }

    /// Construct a guard with a known state
    pub fn new(nested: bool) -> Self {
        Self { nested }
    }

    /// Whether this process is the nested invocation inside a downgraded
    /// build and should short-circuit immediately
    pub fn is_nested(&self) -> bool {
        self.nested
    }
}

/// Run `<package_manager> install` against the scratch directory
pub fn install(package_manager: &str, dir: &Path) -> Result<()> {
    let mut command = Command::new(package_manager);
    command.arg("install").current_dir(dir);

    run_command(command, format!("{} install", package_manager))
}

/// Run `<package_manager> run <args>` against the scratch directory.
///
/// The nested-build flag is set in the child environment so a recursive
/// invocation of this tool from the project's scripts exits immediately.
pub fn run_scripts(package_manager: &str, dir: &Path, args: &[String]) -> Result<()> {
    let mut command = Command::new(package_manager);
    command
        .arg("run")
        .args(args)
        .current_dir(dir)
        .env(NESTED_BUILD_ENV, "1");

    let label = format!("{} run {}", package_manager, args.join(" "));
    run_command(command, label.trim_end().to_string())
}

/// Spawn a command with inherited stdio and surface any non-success exit
fn run_command(mut command: Command, label: String) -> Result<()> {
    tracing::debug!(command = %label, "spawning");

    let status = command.status()?;
    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(DowngradeError::command_failed(label, code)),
        None => Err(DowngradeError::command_terminated(label)),
    }
}
