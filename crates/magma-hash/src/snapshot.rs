//! Snapshot assembly and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use magma_core::{HashError, Node, ROOT_PATH};

use crate::builder::TreeBuilder;
use crate::digest::fold_nodes;

/// Extension of snapshot files.
pub const SNAPSHOT_EXTENSION: &str = "json";

/// A snapshot that has been written to disk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// File the snapshot was written to.
    pub path: PathBuf,
    /// Synthetic root aggregating every tracked path.
    pub root: Node,
}

impl Snapshot {
    /// Digest of the synthetic root.
    pub fn digest(&self) -> &str {
        &self.root.digest
    }
}

/// Builds synthetic roots over several tracked paths and writes them out.
#[derive(Debug, Clone, Default)]
pub struct SnapshotWriter {
    builder: TreeBuilder,
}

impl SnapshotWriter {
    /// Create a writer using the given tree builder.
    pub fn new(builder: TreeBuilder) -> Self {
        Self { builder }
    }

    /// The tree builder used for each root.
    pub fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Build every root path and fold them under one synthetic root.
    ///
    /// Stops at the first root that fails to build.
    pub fn root<P: AsRef<Path>>(&self, root_paths: &[P]) -> Result<Node, HashError> {
        let mut children = Vec::with_capacity(root_paths.len());
        for path in root_paths {
            children.push(self.builder.build(path)?);
        }

        let digest = fold_nodes(&children);
        Ok(Node::directory(ROOT_PATH, digest, children))
    }

    /// Build a snapshot of `root_paths` and write it into `output_dir`.
    ///
    /// Nothing is written unless every root builds successfully.
    pub fn snapshot<P, T>(
        &self,
        output_dir: &Path,
        root_paths: &[P],
        tags: &[T],
    ) -> Result<Snapshot, HashError>
    where
        P: AsRef<Path>,
        T: AsRef<str>,
    {
        let root = self.root(root_paths)?;
        let json = serde_json::to_string_pretty(&root)?;

        let path = output_dir.join(snapshot_file_name(&root, tags));
        fs::write(&path, json).map_err(|e| HashError::io(&path, e))?;

        info!(
            path = %path.display(),
            digest = %root.digest,
            roots = root.child_count(),
            nodes = root.node_count(),
            "Snapshot written"
        );

        Ok(Snapshot { path, root })
    }
}

/// File name for a snapshot: `<8 hex chars>[_<tag>]*.json`.
pub fn snapshot_file_name<T: AsRef<str>>(root: &Node, tags: &[T]) -> String {
    let mut name = root.short_digest().to_string();
    for tag in tags {
        name.push('_');
        name.push_str(tag.as_ref());
    }
    name.push('.');
    name.push_str(SNAPSHOT_EXTENSION);
    name
}
