//! Track list, ignore list and application directory management.
//!
//! These are the flat files that feed the hashing engine: the track file
//! lists the roots to snapshot, the ignore file lists glob patterns to skip,
//! and [`initialize`] lays both out under the application root together with
//! the snapshots directory.

mod error;
mod init;
mod list;
mod track;

pub use error::TrackError;
pub use init::{InitReport, default_ignore_lines, initialize};
pub use list::{parse_list, read_list, read_list_if_exists, write_list};
pub use track::{TrackList, TrackOutcome, UntrackOutcome};
