//! Newline-delimited list files.
//!
//! One entry per line, kept verbatim apart from a trailing `\r`. Lines that
//! are empty, whitespace-only or start with `#` in the first column are
//! comments.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::TrackError;

/// Whether a raw line carries an entry.
pub(crate) fn entry_of(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line)
    }
}

/// Extract the entries of a list file's contents, in order.
pub fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter_map(entry_of)
        .map(str::to_string)
        .collect()
}

/// Read the entries of a list file.
pub fn read_list(path: &Path) -> Result<Vec<String>, TrackError> {
    let contents = fs::read_to_string(path).map_err(|e| TrackError::io(path, e))?;
    Ok(parse_list(&contents))
}

/// Read a list file, returning `None` if it does not exist.
pub fn read_list_if_exists(path: &Path) -> Result<Option<Vec<String>>, TrackError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_list(&contents))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TrackError::io(path, e)),
    }
}

/// Replace the contents of a list file with `lines`, one per line.
pub fn write_list<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), TrackError> {
    let file = File::create(path).map_err(|e| TrackError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| TrackError::io(path, e))?;
    }

    writer.flush().map_err(|e| TrackError::io(path, e))
}
