use serde::{Deserialize, Serialize};
use strata_walk::WalkOptions;

/// Options for a local/remote diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// How the local side is walked.
    #[serde(flatten)]
    pub walk: WalkOptions,
    /// Fail with [`DiffError::UnsortedRemote`](crate::DiffError::UnsortedRemote)
    /// when the remote listing is not strictly ascending. Without the check
    /// an unsorted listing yields a wrong diff.
    pub check_remote_order: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            check_remote_order: true,
        }
    }
}

impl DiffOptions {
    pub fn with_walk(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    pub fn check_remote_order(mut self, check: bool) -> Self {
        self.check_remote_order = check;
        self
    }
}
