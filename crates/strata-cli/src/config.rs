use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use strata_diff::DiffOptions;
use strata_remote::ListingConfig;
use strata_walk::WalkOptions;

/// Config file looked up in the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = ".strata.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    pub listing: ListingConfig,
    pub walk: WalkOptions,
    pub diff: DiffSection,
}

/// The `[diff]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSection {
    pub check_remote_order: bool,
}

impl Default for DiffSection {
    fn default() -> Self {
        Self {
            check_remote_order: true,
        }
    }
}

impl StrataConfig {
    /// Diff options assembled from the `[walk]` and `[diff]` sections.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::default()
            .with_walk(self.walk.clone())
            .check_remote_order(self.diff.check_remote_order)
    }

    /// Load `path`, or `.strata.toml` if it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
