//! Build configuration and application layout.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default application root.
pub const DEFAULT_ROOT: &str = "/etc/magma";

const TRACK_FILE: &str = "track";
const IGNORE_FILE: &str = "ignore";
const SNAPSHOTS_DIR: &str = "snapshots";

/// Order in which directory entries are visited and folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrder {
    /// Whatever order the operating system lists entries in.
    ///
    /// Digests computed this way are only comparable on the same
    /// filesystem.
    #[default]
    Listing,
    /// Entries sorted by file name (byte order).
    Sorted,
}

/// Configuration for building hash trees.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct BuildConfig {
    /// Glob patterns matched against absolute paths.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Directory entry order.
    #[builder(default)]
    #[serde(default)]
    pub entry_order: EntryOrder,
}

impl BuildConfig {
    /// Create a new build config builder.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Create a config with no ignore patterns and listing order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with the given ignore patterns.
    pub fn with_ignore_patterns(patterns: Vec<String>) -> Self {
        Self {
            ignore_patterns: patterns,
            entry_order: EntryOrder::Listing,
        }
    }
}

/// Locations of the files magma keeps under its application root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPaths {
    /// Application root directory.
    pub root: PathBuf,
    /// Newline-delimited list of tracked paths.
    pub track_file: PathBuf,
    /// Newline-delimited list of ignore patterns.
    pub ignore_file: PathBuf,
    /// Directory snapshots are written to.
    pub snapshots_dir: PathBuf,
}

impl AppPaths {
    /// Derive the layout from an application root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            track_file: root.join(TRACK_FILE),
            ignore_file: root.join(IGNORE_FILE),
            snapshots_dir: root.join(SNAPSHOTS_DIR),
            root,
        }
    }

    /// Application root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}
