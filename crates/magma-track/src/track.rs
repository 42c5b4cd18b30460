//! The track list: ordered set of roots to snapshot.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::TrackError;
use crate::list::{entry_of, parse_list};

/// Result of adding a path to the track list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Path was appended.
    Added,
    /// Path was already present; file untouched.
    AlreadyTracked,
}

/// Result of removing a path from the track list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntrackOutcome {
    /// Path was removed.
    Removed,
    /// Path was not present; file untouched.
    NotTracked,
}

/// In-memory view of a track file.
///
/// Adds append a line, removals rewrite the file dropping only the matching
/// line, so comments survive both.
#[derive(Debug, Clone)]
pub struct TrackList {
    path: PathBuf,
    entries: Vec<String>,
}

impl TrackList {
    /// Load the track file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, TrackError> {
        let path = path.into();
        let contents = fs::read_to_string(&path).map_err(|e| TrackError::io(&path, e))?;
        Ok(Self {
            entries: parse_list(&contents),
            path,
        })
    }

    /// Location of the track file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tracked entries in file order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Tracked entries as paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(PathBuf::from).collect()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` is tracked.
    pub fn contains(&self, path: &Path) -> bool {
        let entry = path.to_string_lossy();
        self.entries.iter().any(|e| *e == entry)
    }

    /// Track `path`, which must exist.
    pub fn add(&mut self, path: &Path) -> Result<TrackOutcome, TrackError> {
        if fs::symlink_metadata(path).is_err() {
            return Err(TrackError::MissingPath {
                path: path.to_path_buf(),
            });
        }

        if self.contains(path) {
            info!(path = %path.display(), "Path already tracked");
            return Ok(TrackOutcome::AlreadyTracked);
        }

        let entry = path.to_string_lossy().into_owned();
        self.append_line(&entry)?;
        info!(path = %entry, "Tracking path");
        self.entries.push(entry);

        Ok(TrackOutcome::Added)
    }

    /// Stop tracking `path`.
    pub fn remove(&mut self, path: &Path) -> Result<UntrackOutcome, TrackError> {
        let entry = path.to_string_lossy();
        let Some(index) = self.entries.iter().position(|e| *e == entry) else {
            return Ok(UntrackOutcome::NotTracked);
        };

        let contents = fs::read_to_string(&self.path).map_err(|e| TrackError::io(&self.path, e))?;
        let mut removed = false;
        let mut kept = String::with_capacity(contents.len());
        for line in contents.lines() {
            if !removed && entry_of(line) == Some(&*entry) {
                removed = true;
                continue;
            }
            kept.push_str(line);
            kept.push('\n');
        }
        fs::write(&self.path, kept).map_err(|e| TrackError::io(&self.path, e))?;

        info!(path = %entry, "Untracked path");
        self.entries.remove(index);

        Ok(UntrackOutcome::Removed)
    }

    fn append_line(&self, entry: &str) -> Result<(), TrackError> {
        let needs_newline = match fs::read(&self.path) {
            Ok(bytes) => bytes.last().is_some_and(|b| *b != b'\n'),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(TrackError::io(&self.path, e)),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TrackError::io(&self.path, e))?;

        let line = if needs_newline {
            format!("\n{entry}\n")
        } else {
            format!("{entry}\n")
        };
        file.write_all(line.as_bytes())
            .map_err(|e| TrackError::io(&self.path, e))
    }
}
