//! Ignore pattern matching against absolute paths.

use std::path::Path;

use globset::{Candidate, Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

/// Compiled ignore list.
///
/// `*` never crosses a path separator, `**` does. Patterns are matched
/// against the whole absolute path, so `**/.*` hits dotfiles at any depth and
/// `/var/cache/**` hits `/var/cache` itself and everything below it.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<(String, GlobSet)>,
}

impl IgnoreMatcher {
    /// Compile a pattern list, preserving its order.
    ///
    /// Malformed patterns are dropped with a warning and never match.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match compile(pattern) {
                Ok(set) => compiled.push((pattern.to_string(), set)),
                Err(err) => warn!(pattern, error = %err, "Dropping malformed ignore pattern"),
            }
        }
        Self { patterns: compiled }
    }

    /// Matcher that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// First pattern, in list order, that matches `path`.
    pub fn first_match(&self, path: &Path) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }
        let candidate = Candidate::new(path);
        self.patterns
            .iter()
            .find(|(_, set)| set.is_match_candidate(&candidate))
            .map(|(pattern, _)| pattern.as_str())
    }

    /// Whether `path` is excluded.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.first_match(path).is_some()
    }

    /// Number of usable patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no usable patterns were compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compile one ignore pattern.
///
/// A trailing `/**` also matches the directory it hangs off, so ignoring
/// `dir/**` skips `dir` as a whole instead of listing it.
fn compile(pattern: &str) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    builder.add(glob(pattern)?);

    if let Some(prefix) = pattern.strip_suffix("/**") {
        let prefix = if prefix.is_empty() { "/" } else { prefix };
        builder.add(glob(prefix)?);
    }

    builder.build()
}

fn glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}
