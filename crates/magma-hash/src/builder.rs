//! Recursive hash tree builder.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use magma_core::{BuildConfig, EntryOrder, HashError, Node};

use crate::digest::{fold_nodes, hash_file, hash_path};
use crate::matcher::IgnoreMatcher;

/// Builds a hash tree for a path, one filesystem entry at a time.
///
/// Each visited path is classified in this order:
///
/// 1. lstat; failure aborts the build with [`HashError::NotFound`]
/// 2. ignore patterns; a match yields a `skipped` leaf and stops the walk
/// 3. symlink; hashed by its resolved absolute target, never followed
/// 4. directory; children are built and their digests folded in order
/// 5. anything that is not a regular file; a `skipped` leaf
/// 6. regular file; hashed by content
///
/// The first error anywhere in the subtree aborts the whole build.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    matcher: IgnoreMatcher,
    entry_order: EntryOrder,
}

impl TreeBuilder {
    /// Create a builder from a configuration.
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            matcher: IgnoreMatcher::new(&config.ignore_patterns),
            entry_order: config.entry_order,
        }
    }

    /// Create a builder from an already compiled matcher.
    pub fn with_matcher(matcher: IgnoreMatcher, entry_order: EntryOrder) -> Self {
        Self {
            matcher,
            entry_order,
        }
    }

    /// The ignore patterns this builder applies.
    pub fn matcher(&self) -> &IgnoreMatcher {
        &self.matcher
    }

    /// Directory entry order this builder folds in.
    pub fn entry_order(&self) -> EntryOrder {
        self.entry_order
    }

    /// Build the hash tree rooted at `path`.
    ///
    /// `path` should be absolute: it is what ignore patterns are matched
    /// against and what relative symlink targets are anchored to.
    pub fn build(&self, path: impl AsRef<Path>) -> Result<Node, HashError> {
        self.build_node(path.as_ref())
    }

    fn build_node(&self, path: &Path) -> Result<Node, HashError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| HashError::not_found(path, e))?;

        if let Some(pattern) = self.matcher.first_match(path) {
            debug!(path = %path.display(), pattern, "Ignored");
            return Ok(Node::skipped(path));
        }

        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            return self.build_symlink(path);
        }

        if file_type.is_dir() {
            return self.build_directory(path);
        }

        if !file_type.is_file() {
            debug!(path = %path.display(), "Skipping special file");
            return Ok(Node::skipped(path));
        }

        let digest = hash_file(path)?;
        Ok(Node::leaf(path, digest))
    }

    fn build_symlink(&self, path: &Path) -> Result<Node, HashError> {
        let target = fs::read_link(path).map_err(|e| HashError::io(path, e))?;
        let resolved = resolve_link_target(path, &target);
        debug!(path = %path.display(), target = %resolved.display(), "Hashing symlink target");

        Ok(Node::leaf(path, hash_path(&resolved)))
    }

    fn build_directory(&self, path: &Path) -> Result<Node, HashError> {
        let entries = self.list_entries(path)?;

        let mut children = Vec::with_capacity(entries.len());
        for child_path in &entries {
            children.push(self.build_node(child_path)?);
        }

        let digest = fold_nodes(&children);
        Ok(Node::directory(path, digest, children))
    }

    /// List the immediate children of a directory.
    ///
    /// The listing handle is dropped before any child is visited.
    fn list_entries(&self, path: &Path) -> Result<Vec<PathBuf>, HashError> {
        let read_dir = fs::read_dir(path).map_err(|e| HashError::io(path, e))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| HashError::io(path, e))?;
            names.push(entry.file_name());
        }

        if self.entry_order == EntryOrder::Sorted {
            names.sort();
        }

        Ok(names.into_iter().map(|name| path.join(name)).collect())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(&BuildConfig::default())
    }
}

/// Anchor a link target to the link's parent directory.
///
/// Absolute targets are returned untouched; relative ones are joined to the
/// parent and lexically cleaned.
pub fn resolve_link_target(link: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    let parent = link.parent().unwrap_or_else(|| Path::new("/"));
    clean_path(&parent.join(target))
}

/// Remove `.` components and resolve `..` lexically, without touching the
/// filesystem.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
                // `..` at the root stays at the root
            }
            other => cleaned.push(other),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
