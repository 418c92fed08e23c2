//! Rule file compilation with gitignore-style pattern semantics

use glob::{MatchOptions, Pattern, PatternError};

/// Result of testing one path against a rule set.
///
/// At most one of the excluded/re-included states is active for a given
/// path; the last matching pattern in file order decides which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The path matched an exclusion pattern
    Excluded,
    /// The path matched a `!` re-inclusion pattern
    Reincluded,
    /// No pattern in the rule set matched the path
    Unmatched,
}

/// Type of rule pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// Normal exclusion pattern
    Exclude,
    /// Re-inclusion pattern (starts with !)
    Reinclude,
}

/// A compiled pattern from one rule-file line
#[derive(Debug, Clone)]
struct CompiledPattern {
    /// Type of pattern
    kind: PatternKind,
    /// Glob alternatives; any match counts
    globs: Vec<Pattern>,
}

impl CompiledPattern {
    fn matches(&self, path: &str) -> bool {
        // `*` and `?` must not cross path separators; relativized paths
        // coming out of the stack fold depend on component boundaries.
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.globs.iter().any(|g| g.matches_with(path, options))
    }
}

/// Compiled matcher for the textual contents of one rule file.
///
/// Immutable once built. Paths handed to [`RuleSet::test`] must be relative
/// to the rule file's own directory and use forward-slash separators.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    patterns: Vec<CompiledPattern>,
}

impl RuleSet {
    /// Compile the contents of a rule file.
    ///
    /// Blank lines and `#` comments are skipped. Unparsable lines are
    /// skipped with a warning, never fatal.
    pub fn compile(text: &str) -> Self {
        let mut patterns = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}, // Empty line or comment
                Err(e) => {
                    tracing::warn!(
                        line = line_num + 1,
                        pattern = line,
                        error = %e,
                        "skipping unparsable ignore pattern"
                    );
                },
            }
        }

        Self { patterns }
    }

    /// Test a path against every pattern in file order.
    ///
    /// The last matching pattern wins, so a later `!important.tmp` can
    /// re-include what an earlier `*.tmp` excluded.
    pub fn test(&self, path: &str) -> MatchStatus {
        let mut status = MatchStatus::Unmatched;

        for pattern in &self.patterns {
            if pattern.matches(path) {
                status = match pattern.kind {
                    PatternKind::Exclude => MatchStatus::Excluded,
                    PatternKind::Reinclude => MatchStatus::Reincluded,
                };
            }
        }

        status
    }

    /// Whether the rule set holds no patterns at all
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Parse a single rule-file line into a compiled pattern
fn parse_line(line: &str) -> Result<Option<CompiledPattern>, PatternError> {
    let line = line.trim();

    // Skip empty lines and comments
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (kind, pattern_str) = match line.strip_prefix('!') {
        Some(rest) => (PatternKind::Reinclude, rest),
        None => (PatternKind::Exclude, line),
    };

    let pattern_str = pattern_str.trim();
    if pattern_str.is_empty() {
        return Ok(None);
    }

    // A trailing slash restricts the pattern to directories, which for
    // file-path matching means "everything beneath this name".
    let (directory_only, clean) = match pattern_str.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, pattern_str),
    };

    // A leading slash anchors without being part of the match text; any
    // other slash anchors too.
    let anchored = clean.starts_with('/') || clean.contains('/');
    let clean = clean.strip_prefix('/').unwrap_or(clean);
    if clean.is_empty() {
        return Ok(None);
    }

    let mut globs = Vec::new();
    for text in glob_candidates(clean, anchored, directory_only) {
        globs.push(Pattern::new(&text)?);
    }

    Ok(Some(CompiledPattern { kind, globs }))
}

/// Expand one pattern into the glob alternatives that reproduce its scope.
///
/// Unanchored patterns match at any depth; every pattern also swallows the
/// contents of a directory it names (`build/` must match `build/keep.txt`).
fn glob_candidates(clean: &str, anchored: bool, directory_only: bool) -> Vec<String> {
    let mut candidates = Vec::new();

    if anchored {
        if !directory_only {
            candidates.push(clean.to_string());
        }
        candidates.push(format!("{}/**", clean));
        // An explicit **/ prefix already floats the pattern; keep a
        // stripped variant so it also matches with zero leading components.
        if let Some(rest) = clean.strip_prefix("**/") {
            if !directory_only {
                candidates.push(rest.to_string());
            }
            candidates.push(format!("{}/**", rest));
        }
    } else {
        if !directory_only {
            candidates.push(clean.to_string());
            candidates.push(format!("**/{}", clean));
        }
        candidates.push(format!("{}/**", clean));
        candidates.push(format!("**/{}/**", clean));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_patterns() {
        let rules = RuleSet::compile("*.tmp\nbuild/\n");

        assert_eq!(rules.test("test.tmp"), MatchStatus::Excluded);
        assert_eq!(rules.test("test.txt"), MatchStatus::Unmatched);
        assert_eq!(rules.test("build/out.js"), MatchStatus::Excluded);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let rules = RuleSet::compile("# comment\n\n   \n*.log\n");

        assert_eq!(rules.len(), 1);
        assert_eq!(rules.test("app.log"), MatchStatus::Excluded);
    }

    #[test]
    fn test_reinclusion_last_match_wins() {
        let rules = RuleSet::compile("*.tmp\n!important.tmp\n");

        assert_eq!(rules.test("cache.tmp"), MatchStatus::Excluded);
        assert_eq!(rules.test("important.tmp"), MatchStatus::Reincluded);
    }

    #[test]
    fn test_exclusion_after_reinclusion_wins() {
        let rules = RuleSet::compile("!keep.log\n*.log\n");

        // File order decides; the broad pattern came last.
        assert_eq!(rules.test("keep.log"), MatchStatus::Excluded);
    }

    #[test]
    fn test_unanchored_matches_at_any_depth() {
        let rules = RuleSet::compile("*.log\nnode_cache\n");

        assert_eq!(rules.test("app.log"), MatchStatus::Excluded);
        assert_eq!(rules.test("sub/dir/app.log"), MatchStatus::Excluded);
        assert_eq!(rules.test("sub/node_cache/data.bin"), MatchStatus::Excluded);
    }

    #[test]
    fn test_anchored_patterns() {
        let rules = RuleSet::compile("/dist\nsrc/*.gen.js\n");

        assert_eq!(rules.test("dist"), MatchStatus::Excluded);
        assert_eq!(rules.test("dist/bundle.js"), MatchStatus::Excluded);
        assert_eq!(rules.test("sub/dist"), MatchStatus::Unmatched);
        assert_eq!(rules.test("src/api.gen.js"), MatchStatus::Excluded);
        assert_eq!(rules.test("other/api.gen.js"), MatchStatus::Unmatched);
    }

    #[test]
    fn test_directory_only_pattern() {
        let rules = RuleSet::compile("build/\n");

        assert_eq!(rules.test("build/keep.txt"), MatchStatus::Excluded);
        assert_eq!(rules.test("nested/build/out.js"), MatchStatus::Excluded);
        // A plain file named like the directory does not match.
        assert_eq!(rules.test("build"), MatchStatus::Unmatched);
    }

    #[test]
    fn test_star_does_not_cross_separators() {
        let rules = RuleSet::compile("/out/*.js\n");

        assert_eq!(rules.test("out/main.js"), MatchStatus::Excluded);
        assert_eq!(rules.test("out/sub/main.js"), MatchStatus::Unmatched);
    }

    #[test]
    fn test_double_star_prefix() {
        let rules = RuleSet::compile("**/cache/\n");

        assert_eq!(rules.test("cache/x"), MatchStatus::Excluded);
        assert_eq!(rules.test("deep/cache/x"), MatchStatus::Excluded);
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let rules = RuleSet::compile("[\n*.tmp\n");

        // The bad line is dropped, the rest still compiles.
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.test("x.tmp"), MatchStatus::Excluded);
    }

    #[test]
    fn test_empty_rule_set() {
        let rules = RuleSet::compile("");

        assert!(rules.is_empty());
        assert_eq!(rules.test("anything"), MatchStatus::Unmatched);
    }
}
