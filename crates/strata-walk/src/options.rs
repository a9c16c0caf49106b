//! Walk configuration.

use serde::{Deserialize, Serialize};

/// Name of the reference file a local checkout keeps at its root.
pub const DEFAULT_REF_FILE_NAME: &str = ".strata_ref.yaml";

/// Options controlling an ordered walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Entry names skipped at any depth. A matching directory is pruned with
    /// everything below it.
    pub ignore_names: Vec<String>,
    /// Skip symlinks, sockets, devices and other non-regular files instead of
    /// reporting them with their own metadata.
    pub skip_non_regular_files: bool,
    /// Follow symbolic links and report the metadata of their targets.
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            ignore_names: vec![DEFAULT_REF_FILE_NAME.to_string()],
            skip_non_regular_files: false,
            follow_links: false,
        }
    }
}

impl WalkOptions {
    /// Options that skip nothing.
    pub fn all_files() -> Self {
        Self {
            ignore_names: Vec::new(),
            ..Self::default()
        }
    }

    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore_names.push(name.into());
        self
    }

    pub fn skip_non_regular_files(mut self, skip: bool) -> Self {
        self.skip_non_regular_files = skip;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Returns `true` if entries with this name are skipped.
    pub fn is_ignored(&self, name: &std::ffi::OsStr) -> bool {
        self.ignore_names.iter().any(|n| name == n.as_str())
    }

    /// Returns `true` if a `/`-separated relative path would never be
    /// emitted by a walk: its own name or one of its directories is ignored.
    pub fn is_ignored_path(&self, path: &str) -> bool {
        path.split('/')
            .any(|component| self.ignore_names.iter().any(|n| n == component))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn default_ignores_ref_file_only() {
        let opts = WalkOptions::default();
        assert!(opts.is_ignored(OsStr::new(DEFAULT_REF_FILE_NAME)));
        assert!(!opts.is_ignored(OsStr::new(".hidden-file")));
        assert!(!opts.skip_non_regular_files);
        assert!(!opts.follow_links);
    }

    #[test]
    fn ignored_path_matches_any_component() {
        let opts = WalkOptions::all_files().ignore(".git");
        assert!(opts.is_ignored_path(".git"));
        assert!(opts.is_ignored_path(".git/config"));
        assert!(opts.is_ignored_path("sub/.git/HEAD"));
        assert!(!opts.is_ignored_path("sub/.gitignore"));
        assert!(WalkOptions::default().is_ignored_path("sub/.strata_ref.yaml"));
        assert!(!WalkOptions::all_files().is_ignored_path(".strata_ref.yaml"));
    }

    #[test]
    fn all_files_ignores_nothing() {
        assert!(!WalkOptions::all_files().is_ignored(OsStr::new(DEFAULT_REF_FILE_NAME)));
    }

    #[test]
    fn builder_chains() {
        let opts = WalkOptions::all_files()
            .ignore(".git")
            .skip_non_regular_files(true)
            .follow_links(true);
        assert!(opts.is_ignored(OsStr::new(".git")));
        assert!(opts.skip_non_regular_files);
        assert!(opts.follow_links);
    }
}
