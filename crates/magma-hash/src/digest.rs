//! SHA-256 primitives for file content, strings and child folds.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use magma_core::{HashError, Node};

/// Hash a byte stream to completion and return the lowercase hex digest.
pub fn hash_bytes<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash an in-memory byte slice.
pub fn hash_slice(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Hash the UTF-8 bytes of a string.
pub fn hash_string(text: &str) -> String {
    hash_slice(text.as_bytes())
}

/// Hash the raw bytes of a path.
///
/// On Unix this is the exact byte string the filesystem stores, so paths that
/// are not valid UTF-8 still hash distinctly.
pub fn hash_path(path: &Path) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        hash_slice(path.as_os_str().as_bytes())
    }
    #[cfg(not(unix))]
    {
        hash_string(&path.to_string_lossy())
    }
}

/// Hash the in-order concatenation of the given digests.
///
/// Equivalent to `hash_string(&digests.concat())` without building the
/// concatenated string. Order matters: this is not a commutative combine.
pub fn fold<'a, I>(digests: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for digest in digests {
        hasher.update(digest.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Fold the digests of a node list.
pub fn fold_nodes(nodes: &[Node]) -> String {
    fold(nodes.iter().map(|node| node.digest.as_str()))
}

/// Hash the content of the file at `path`.
///
/// The file handle is closed before this returns.
pub fn hash_file(path: &Path) -> Result<String, HashError> {
    let file = File::open(path).map_err(|e| HashError::io(path, e))?;
    hash_bytes(file).map_err(|e| HashError::io(path, e))
}
