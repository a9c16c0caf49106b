//! Classified differences between local and remote state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of difference found for a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Exists locally, absent remotely.
    Added,
    /// Exists remotely, absent locally.
    Removed,
    /// Exists on both sides with a different size or modification time.
    Modified,
}

impl ChangeType {
    /// Lower-case name used in output and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "added" | "a" => Ok(Self::Added),
            "removed" | "r" => Ok(Self::Removed),
            "modified" | "m" => Ok(Self::Modified),
            _ => Err(TypeError::UnknownChangeType(s.to_string())),
        }
    }
}

/// One classified difference for a single path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    /// Path relative to the diff root, `/`-separated.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ChangeType,
}

impl Change {
    pub fn new(path: impl Into<String>, kind: ChangeType) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn added(path: impl Into<String>) -> Self {
        Self::new(path, ChangeType::Added)
    }

    pub fn removed(path: impl Into<String>) -> Self {
        Self::new(path, ChangeType::Removed)
    }

    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(path, ChangeType::Modified)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Per-kind counts over a change list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ChangeSummary {
    /// Count the changes in a list.
    pub fn from_changes<'a>(changes: impl IntoIterator<Item = &'a Change>) -> Self {
        let mut summary = Self::default();
        for change in changes {
            summary.record(change.kind);
        }
        summary
    }

    /// Count one more change of the given kind.
    pub fn record(&mut self, kind: ChangeType) {
        match kind {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Modified => self.modified += 1,
        }
    }

    /// Total number of changes.
    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }

    /// Returns `true` if nothing changed.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} modified",
            self.added, self.removed, self.modified
        )
    }
}
