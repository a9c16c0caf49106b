//! Remote object records.

use serde::{Deserialize, Serialize};

/// Kind of a remote listing result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    /// A stored object.
    #[default]
    Object,
    /// A delimiter-grouped prefix (only produced by delimited listings).
    CommonPrefix,
}

/// Stats of one object in a remote listing.
///
/// Field names follow the remote API so listings can be deserialized
/// directly. Records are produced by the listing side; the diff engine only
/// consumes them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectStats {
    /// Full object key relative to the diffed prefix.
    pub path: String,
    #[serde(default)]
    pub path_type: PathType,
    /// Size in bytes. Absent for some prefix-only records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Modification time in whole seconds since the UNIX epoch.
    pub mtime: i64,
}

impl ObjectStats {
    /// Create a plain object record.
    pub fn new(path: impl Into<String>, size_bytes: u64, mtime: i64) -> Self {
        Self {
            path: path.into(),
            path_type: PathType::Object,
            size_bytes: Some(size_bytes),
            mtime,
        }
    }

    /// Size in bytes, treating a missing size as zero.
    pub fn size(&self) -> u64 {
        self.size_bytes.unwrap_or(0)
    }

    /// Returns `true` for records that stand for a directory rather than a
    /// file: common prefixes and zero-content keys ending in `/`.
    pub fn is_directory_marker(&self) -> bool {
        self.path_type == PathType::CommonPrefix || self.path.ends_with('/')
    }
}
