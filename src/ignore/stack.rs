//! Ordered chain of rule-file frames governing a directory
//!
//! An [`IgnoreStack`] holds one frame per governing `.gitignore`, from the
//! filesystem root down to the directory being traversed. Inner frames take
//! precedence over outer ones, and a re-inclusion in one layer can suppress
//! an exclusion in another.

use crate::core::error::Result;
use crate::ignore::ruleset::{MatchStatus, RuleSet};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the per-directory rule file
pub const RULE_FILE_NAME: &str = ".gitignore";

/// One rule file's compiled matcher plus its position in the chain.
///
/// `child` is the forward-slash relative path from this frame's directory
/// down to the next inner frame's directory (for the innermost frame, down
/// to the directory currently being traversed). `"."` means they coincide.
/// Intermediate directories without a rule file of their own contribute no
/// frame; their segments accumulate into the nearest outer frame's `child`.
#[derive(Debug, Clone)]
struct StackFrame {
    child: String,
    rules: RuleSet,
}

/// The ordered chain of rule-file frames, outer-to-inner.
///
/// Frames are immutable; descending into a subdirectory clones the frame
/// list, so sibling traversal branches never observe each other's rule
/// files.
#[derive(Debug, Clone, Default)]
pub struct IgnoreStack {
    frames: Vec<StackFrame>,
}

impl IgnoreStack {
    /// Build the stack governing `dir` by scanning every ancestor directory,
    /// filesystem root first, for a rule file.
    ///
    /// Succeeds with an empty stack when no rule files exist anywhere.
    pub fn for_directory(dir: &Path) -> Result<Self> {
        let absolute = dunce::canonicalize(dir)?;

        let mut chain: Vec<&Path> = absolute.ancestors().collect();
        chain.reverse();

        let mut located: Vec<(&Path, RuleSet)> = Vec::new();
        for ancestor in chain {
            if let Some(text) = read_rule_file(&ancestor.join(RULE_FILE_NAME)) {
                located.push((ancestor, RuleSet::compile(&text)));
            }
        }

        let dirs: Vec<&Path> = located.iter().map(|(d, _)| *d).collect();
        let mut frames = Vec::with_capacity(located.len());
        for (i, (frame_dir, rules)) in located.into_iter().enumerate() {
            let inner_dir = dirs.get(i + 1).copied().unwrap_or(absolute.as_path());
            frames.push(StackFrame {
                child: relative_child(frame_dir, inner_dir),
                rules,
            });
        }

        Ok(Self { frames })
    }

    /// Produce the stack governing the subdirectory `name` of the directory
    /// this stack currently governs.
    ///
    /// The frame list is cloned, `name` is appended to the top frame's
    /// `child`, and a fresh frame is pushed if `child_dir` carries its own
    /// rule file. `child_dir` is the subdirectory's full path on disk.
    pub fn descend(&self, child_dir: &Path, name: &str) -> Self {
        let mut frames = self.frames.clone();

        if let Some(top) = frames.last_mut() {
            top.child = join_segments(&top.child, name);
        }

        if let Some(text) = read_rule_file(&child_dir.join(RULE_FILE_NAME)) {
            frames.push(StackFrame {
                child: ".".to_string(),
                rules: RuleSet::compile(&text),
            });
        }

        Self { frames }
    }

    /// Resolve the final ignore status of a file named `name` in the
    /// directory this stack governs.
    ///
    /// Frames fold right-to-left (innermost first). Each step prepends the
    /// frame's `child` so the candidate path stays relative to that frame's
    /// directory, then updates the exclusion flags from the previous step's
    /// values: a more specific layer's decision suppresses the opposite
    /// decision from a less specific one, and only one flag survives a step.
    pub fn ignored(&self, name: &str) -> bool {
        let mut current_path = name.to_string();
        let mut excluded = false;
        let mut reincluded = false;

        for frame in self.frames.iter().rev() {
            current_path = join_segments(&frame.child, &current_path);
            let status = frame.rules.test(&current_path);

            let was_excluded = excluded;
            excluded = status == MatchStatus::Excluded && !reincluded;
            reincluded = status == MatchStatus::Reincluded && !was_excluded;
        }

        excluded
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether no rule file governs the directory
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Read a rule file, treating "not found" as silent absence.
///
/// Any other read failure (permission denied, loops, encoding) is logged
/// and treated as absence as well; one unreadable file must not abort a
/// long traversal.
fn read_rule_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable rule file, skipping");
            None
        },
    }
}

/// Forward-slash relative path from `outer` down to `inner`, `"."` if equal
fn relative_child(outer: &Path, inner: &Path) -> String {
    let rel = inner.strip_prefix(outer).unwrap_or(inner);
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Join two forward-slash fragments, treating `"."` as empty
fn join_segments(prefix: &str, rest: &str) -> String {
    if prefix.is_empty() || prefix == "." {
        rest.to_string()
    } else if rest.is_empty() || rest == "." {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_stack_ignores_nothing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let stack = IgnoreStack::for_directory(temp_dir.path())?;

        assert!(stack.is_empty());
        assert!(!stack.ignored("anything.txt"));

        Ok(())
    }

    #[test]
    fn test_single_rule_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join(".gitignore"), "*.log\n")?;

        let stack = IgnoreStack::for_directory(temp_dir.path())?;

        assert_eq!(stack.depth(), 1);
        assert!(stack.ignored("a.log"));
        assert!(!stack.ignored("a.txt"));

        Ok(())
    }

    #[test]
    fn test_ancestor_rule_file_governs_subdirectory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.tmp\n")?;
        fs::create_dir_all(root.join("a/b"))?;

        // No rule files below the root: the intermediate segments are
        // absorbed into the root frame's child path.
        let stack = IgnoreStack::for_directory(&root.join("a/b"))?;

        assert_eq!(stack.depth(), 1);
        assert!(stack.ignored("scratch.tmp"));
        assert!(!stack.ignored("scratch.txt"));

        Ok(())
    }

    #[test]
    fn test_descend_appends_and_pushes() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*.tmp\n")?;
        let sub = root.join("sub");
        fs::create_dir(&sub)?;
        fs::write(sub.join(".gitignore"), "*.log\n")?;

        let stack = IgnoreStack::for_directory(root)?;
        let extended = stack.descend(&sub, "sub");

        assert_eq!(extended.depth(), 2);
        // The original stack is untouched (copy-on-branch).
        assert_eq!(stack.depth(), 1);

        // The outer layer's patterns keep applying below sub/.
        assert!(extended.ignored("x.tmp"));
        assert!(!extended.ignored("x.txt"));
        // The outermost frame has the final say: a match seen only by the
        // inner frame does not survive an outer frame reporting no match.
        assert!(!extended.ignored("x.log"));

        Ok(())
    }

    #[test]
    fn test_inner_reinclusion_overrides_outer_exclusion() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "build/\n")?;
        let build = root.join("build");
        fs::create_dir(&build)?;
        fs::write(build.join(".gitignore"), "!keep.txt\n")?;

        let stack = IgnoreStack::for_directory(root)?.descend(&build, "build");

        // The inner re-inclusion suppresses the outer build/ exclusion...
        assert!(!stack.ignored("keep.txt"));
        // ...but only for the paths it names.
        assert!(stack.ignored("other.txt"));

        Ok(())
    }

    #[test]
    fn test_suppressed_reinclusion_cannot_cancel_outer_exclusion() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "sub/\n")?;
        let sub = root.join("sub");
        fs::create_dir(&sub)?;
        fs::write(sub.join(".gitignore"), "!inner/secret.txt\n")?;
        let inner = sub.join("inner");
        fs::create_dir(&inner)?;
        fs::write(inner.join(".gitignore"), "secret.txt\n")?;

        let stack = IgnoreStack::for_directory(root)?
            .descend(&sub, "sub")
            .descend(&inner, "inner");

        // The innermost frame excluded the file, so the middle frame's
        // re-inclusion is suppressed and the root's sub/ exclusion stands.
        assert!(stack.ignored("secret.txt"));

        Ok(())
    }

    #[test]
    fn test_join_segments() {
        assert_eq!(join_segments(".", "a.txt"), "a.txt");
        assert_eq!(join_segments("", "a.txt"), "a.txt");
        assert_eq!(join_segments("sub", "a.txt"), "sub/a.txt");
        assert_eq!(join_segments("a/b", "c.txt"), "a/b/c.txt");
        assert_eq!(join_segments("sub", "."), "sub");
    }
}
