//! Lazy directory traversal with hierarchical rule-file filtering

use crate::core::error::Result;
use crate::ignore::stack::IgnoreStack;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names that are never yielded and never recursed into,
/// regardless of rule-file contents: version-control metadata and the
/// dependency cache.
pub const RESERVED_DIRS: [&str; 2] = [".git", "node_modules"];

/// Recursive walker over a project tree.
///
/// Each call to [`TreeWalker::walk`] re-reads the filesystem and produces a
/// fresh, finite, single-pass iterator of root-relative file paths.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
}

impl TreeWalker {
    /// Create a walker rooted at `root` (canonicalized)
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = dunce::canonicalize(root.as_ref())?;
        Ok(Self { root })
    }

    /// The canonical traversal root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a traversal.
    ///
    /// Builds the initial [`IgnoreStack`] for the root (scanning ancestor
    /// rule files) and reads the root's entry listing; only an unreadable
    /// root fails here. Everything deeper degrades gracefully: unreadable
    /// subdirectories or entries are logged and skipped.
    pub fn walk(&self) -> Result<Walk> {
        let stack = IgnoreStack::for_directory(&self.root)?;
        let entries = read_entries(&self.root)?;

        Ok(Walk {
            root: self.root.clone(),
            levels: vec![Level {
                dir: self.root.clone(),
                stack,
                entries,
            }],
        })
    }
}

/// One in-flight directory of a traversal
struct Level {
    /// Absolute path of the directory
    dir: PathBuf,
    /// The fully-extended stack governing this directory
    stack: IgnoreStack,
    /// Remaining entries, in directory-listing order
    entries: std::vec::IntoIter<fs::DirEntry>,
}

/// Depth-first iterator over the non-excluded regular files of a tree.
///
/// Yields paths relative to the traversal root, in directory-listing order
/// per level. Each recursive branch owns its own stack snapshot, so sibling
/// subdirectories never observe each other's rule files.
pub struct Walk {
    root: PathBuf,
    levels: Vec<Level>,
}

impl Iterator for Walk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let level = self.levels.last_mut()?;

            let Some(entry) = level.entries.next() else {
                self.levels.pop();
                continue;
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "cannot stat entry, skipping"
                    );
                    continue;
                },
            };

            if file_type.is_dir() {
                if RESERVED_DIRS.contains(&name.as_str()) {
                    continue;
                }

                let child_dir = level.dir.join(&name);
                let child_stack = level.stack.descend(&child_dir, &name);
                match read_entries(&child_dir) {
                    Ok(entries) => self.levels.push(Level {
                        dir: child_dir,
                        stack: child_stack,
                        entries,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            path = %child_dir.display(),
                            error = %e,
                            "cannot list directory, skipping"
                        );
                    },
                }
            } else if file_type.is_file() {
                if !level.stack.ignored(&name) {
                    let path = level.dir.join(&name);
                    let relative = path
                        .strip_prefix(&self.root)
                        .unwrap_or(&path)
                        .to_path_buf();
                    return Some(relative);
                }
            }
            // Symlinks and other non-regular entries are neither followed
            // nor yielded.
        }
    }
}

/// Read a directory's full entry listing before any filtering happens
fn read_entries(dir: &Path) -> std::io::Result<std::vec::IntoIter<fs::DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "skipping unreadable entry");
            },
        }
    }
    Ok(entries.into_iter())
}
