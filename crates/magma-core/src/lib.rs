//! Core types for magma.
//!
//! This crate provides the data structures shared by the hashing engine,
//! the track list tooling and the command line: hash tree nodes, error
//! types, build configuration and the on-disk application layout.

mod config;
mod error;
mod node;

pub use config::{AppPaths, BuildConfig, BuildConfigBuilder, EntryOrder, DEFAULT_ROOT};
pub use error::HashError;
pub use node::{Node, ROOT_PATH, SKIPPED};
