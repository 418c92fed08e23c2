//! downgrade-build - lowest-supported-versions build fixtures
//!
//! downgrade-build snapshots an npm project tree while honoring nested
//! `.gitignore` files, rewrites its `package.json` so every declared
//! dependency range is pinned to the minimum version satisfying it, and
//! runs the package manager's install and build scripts against the
//! resulting scratch fixture. A green build proves the project really does
//! work with the oldest versions its ranges claim to support.
//!
//! # Core pieces
//!
//! - **Rule Set**: compiles one `.gitignore`'s text into a matcher
//! - **Ignore Stack**: folds the chain of governing rule files, inner
//!   frames overriding outer ones
//! - **Tree Walker**: lazily yields every non-excluded regular file
//! - **Dependency Minimizer**: maps every version range to its floor
//!
//! # Example
//!
//! ```rust,no_run
//! use downgrade_build::{minimum_version, TreeWalker};
//!
//! // Everything the snapshot of a project would contain:
//! let walker = TreeWalker::new("./my-project")?;
//! for path in walker.walk()? {
//!     println!("{}", path.display());
//! }
//!
//! // The floor of a dependency range:
//! let floor = minimum_version(">=1.2.0 <2.0.0").unwrap();
//! assert_eq!(floor.to_string(), "1.2.0");
//! # Ok::<(), downgrade_build::DowngradeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod manifest;
pub mod runner;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    error::{DowngradeError, Result},
    types::DependencyMap,
};

pub use crate::ignore::{
    ruleset::{MatchStatus, RuleSet},
    stack::IgnoreStack,
    walker::{TreeWalker, Walk},
};

pub use crate::manifest::{
    minimize::{downgrade, minimize, minimum_version},
    PackageManifest,
};

pub use crate::runner::ReentrancyGuard;

/// Current version of downgrade-build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
