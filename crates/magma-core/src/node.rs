//! Hash tree node type.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};

/// Digest sentinel for ignored paths and special files.
pub const SKIPPED: &str = "skipped";

/// Path recorded on the synthetic root that aggregates all tracked roots.
pub const ROOT_PATH: &str = "root";

/// Number of hex characters of the root digest used in snapshot file names.
const SHORT_DIGEST_LEN: usize = 8;

/// A single entry in the hash tree.
///
/// Directory digests are a fold of their children's digests, so a node's
/// `digest` only has meaning together with its `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute path this node was built from.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,

    /// Hex-encoded SHA-256 digest, or [`SKIPPED`].
    #[serde(rename = "hash")]
    pub digest: String,

    /// Child nodes in traversal order (directories only).
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a leaf node (file or symlink).
    pub fn leaf(path: impl Into<PathBuf>, digest: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            digest: digest.into(),
            children: Vec::new(),
        }
    }

    /// Create a node for an ignored path or special file.
    pub fn skipped(path: impl Into<PathBuf>) -> Self {
        Self::leaf(path, SKIPPED)
    }

    /// Create a directory node from its already folded digest.
    pub fn directory(path: impl Into<PathBuf>, digest: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            path: path.into(),
            digest: digest.into(),
            children,
        }
    }

    /// Whether this node was skipped rather than hashed.
    pub fn is_skipped(&self) -> bool {
        self.digest == SKIPPED
    }

    /// Whether this node has children.
    pub fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Leading characters of the digest used to name snapshot files.
    pub fn short_digest(&self) -> &str {
        let end = self
            .digest
            .char_indices()
            .nth(SHORT_DIGEST_LEN)
            .map_or(self.digest.len(), |(i, _)| i);
        &self.digest[..end]
    }
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_node() {
        let node = Node::skipped("/etc/magma");
        assert!(node.is_skipped());
        assert!(!node.is_dir());
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_short_digest() {
        let node = Node::leaf("/a", "b94d27b9934d3e08a52e52d7da7dacff");
        assert_eq!(node.short_digest(), "b94d27b9");

        let short = Node::leaf("/a", "abc");
        assert_eq!(short.short_digest(), "abc");
    }

    #[test]
    fn test_node_count() {
        let tree = Node::directory(
            "/d",
            "ff",
            vec![Node::leaf("/d/a", "aa"), Node::skipped("/d/b")],
        );
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.child_count(), 2);
        assert!(tree.children[1].is_skipped());
    }
}
