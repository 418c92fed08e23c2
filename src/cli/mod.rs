//! Command-line interface for downgrade-build

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// downgrade-build - lowest-supported-versions build fixtures
#[derive(Parser)]
#[command(
    name = "downgrade-build",
    version,
    about = "Snapshot an npm project and build it against its minimum dependency versions",
    long_about = "Copies a project tree into a scratch directory while honoring nested \
.gitignore files, rewrites its package.json so every dependency range is pinned to the \
lowest version satisfying it, then runs the package manager's install and the given \
scripts against the fixture."
)]
pub struct Cli {
    /// Project root directory (default: discovered from the current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable progress reporting
    #[arg(long, global = true)]
    pub no_progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Snapshot the project, downgrade its manifest and run a build against it
    Run {
        /// Script names passed to `<package-manager> run`
        args: Vec<String>,

        /// Keep the scratch directory after the build
        #[arg(long)]
        keep: bool,
    },

    /// List the files a snapshot would contain
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the downgraded manifest without writing anything
    Manifest,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
