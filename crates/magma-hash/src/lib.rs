//! Tree hashing engine for magma.
//!
//! This crate walks tracked paths and folds SHA-256 digests bottom-up into
//! one Merkle-style digest per directory, then persists the result as a
//! snapshot.
//!
//! # Overview
//!
//! - **Primitive hashing** of file content, strings and child digest lists
//! - **Ignore patterns** matched against absolute paths before anything is
//!   read
//! - **Symlinks** hashed by their resolved target and never followed
//! - **Snapshots** named after the root digest so identical states share a
//!   name
//!
//! # Example
//!
//! ```rust,no_run
//! use magma_hash::{BuildConfig, SnapshotWriter, TreeBuilder};
//! use std::path::Path;
//!
//! let config = BuildConfig::with_ignore_patterns(vec!["**/.*".to_string()]);
//! let writer = SnapshotWriter::new(TreeBuilder::new(&config));
//!
//! let snapshot = writer
//!     .snapshot(Path::new("/etc/magma/snapshots"), &["/etc", "/usr/bin"], &["nightly"])
//!     .unwrap();
//!
//! println!("Snapshot saved to {}", snapshot.path.display());
//! ```

mod builder;
mod digest;
mod matcher;
mod snapshot;

pub use builder::{TreeBuilder, clean_path, resolve_link_target};
pub use digest::{fold, fold_nodes, hash_bytes, hash_file, hash_path, hash_slice, hash_string};
pub use matcher::IgnoreMatcher;
pub use snapshot::{SNAPSHOT_EXTENSION, Snapshot, SnapshotWriter, snapshot_file_name};

// Re-export core types for convenience
pub use magma_core::{BuildConfig, EntryOrder, HashError, Node, ROOT_PATH, SKIPPED};
