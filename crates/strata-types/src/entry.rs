//! Local filesystem observations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A file observed under a walk root.
///
/// `path` is relative to the root and always uses `/` as the separator.
/// Directories only drive recursion; a walker never hands one to its caller,
/// but the flag is kept so the same type can describe any listed child.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathEntry {
    /// Path relative to the walk root, `/`-separated.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Modification time in whole seconds since the UNIX epoch.
    pub mtime: i64,
    /// Whether this entry is a directory.
    pub is_dir: bool,
}

impl PathEntry {
    /// Create an entry for a plain file.
    pub fn file(path: impl Into<String>, size: u64, mtime: i64) -> Self {
        Self {
            path: path.into(),
            size,
            mtime,
            is_dir: false,
        }
    }

    /// Returns `true` if size and modification time both match.
    pub fn same_metadata(&self, size: u64, mtime: i64) -> bool {
        self.size == size && self.mtime == mtime
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes, mtime {})", self.path, self.size, self.mtime)
    }
}
