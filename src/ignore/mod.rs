//! Hierarchical ignore-pattern traversal engine
//!
//! This module decides, for every path in a directory tree, whether it
//! belongs in a project snapshot. Exclusion rules come from per-directory
//! `.gitignore` files whose scope cascades to descendants; nested files
//! override ancestor rules and `!`-prefixed patterns re-include paths a
//! broader pattern excluded.

pub mod ruleset;
pub mod stack;
pub mod walker;

// Re-export commonly used items
pub use ruleset::{MatchStatus, RuleSet};
pub use stack::{IgnoreStack, RULE_FILE_NAME};
pub use walker::{TreeWalker, Walk, RESERVED_DIRS};
