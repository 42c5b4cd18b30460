//! One-time application directory setup.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use magma_core::AppPaths;

use crate::TrackError;
use crate::list::write_list;

/// What [`initialize`] created. Existing files and directories are left
/// untouched and not reported.
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// Files and directories created, in creation order.
    pub created: Vec<PathBuf>,
    /// Lines written to a freshly created ignore file.
    pub ignore_defaults: Option<Vec<String>>,
}

impl InitReport {
    /// Whether everything already existed.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Default ignore file contents: the application root itself and every
/// dotfile.
pub fn default_ignore_lines(paths: &AppPaths) -> Vec<String> {
    vec![
        "# self directory".to_string(),
        paths.root().to_string_lossy().into_owned(),
        "# any hidden files or directories that start with a dot".to_string(),
        "**/.*".to_string(),
        "# example: **/*.log to ignore all log files".to_string(),
        "# example: **/logs/* to ignore all files in the logs directory".to_string(),
    ]
}

/// Create the application root, track file, snapshots directory and ignore
/// file, skipping whatever already exists.
pub fn initialize(paths: &AppPaths) -> Result<InitReport, TrackError> {
    let mut report = InitReport::default();

    if create_dir(&paths.root)? {
        report.created.push(paths.root.clone());
    }

    if create_empty_file(&paths.track_file)? {
        report.created.push(paths.track_file.clone());
    }

    if create_dir(&paths.snapshots_dir)? {
        report.created.push(paths.snapshots_dir.clone());
    }

    if !paths.ignore_file.exists() {
        let lines = default_ignore_lines(paths);
        write_list(&paths.ignore_file, &lines)?;
        report.created.push(paths.ignore_file.clone());
        report.ignore_defaults = Some(lines);
    }

    info!(root = %paths.root.display(), created = report.created.len(), "Initialized");
    Ok(report)
}

/// Returns whether the directory was created.
fn create_dir(path: &Path) -> Result<bool, TrackError> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| TrackError::io(path, e))?;
    Ok(true)
}

/// Returns whether the file was created.
fn create_empty_file(path: &Path) -> Result<bool, TrackError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(TrackError::io(path, e)),
    }
}
