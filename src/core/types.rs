//! Shared types for downgrade-build

use indexmap::IndexMap;

/// Mapping from dependency name to version specifier.
///
/// Insertion-ordered so a rewritten manifest keeps the key order of the
/// manifest it was derived from.
pub type DependencyMap = IndexMap<String, String>;
