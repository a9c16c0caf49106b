//! Ordered local walker for strata.
//!
//! Walks a directory subtree and emits its files in the same total order as
//! a flat, byte-lexicographic sort of their full relative paths, which is the
//! order an object store lists keys in. Only per-directory sorts are needed:
//! children are compared by their *augmented key* (the name, plus a trailing
//! `/` for directories), so everything under `dir/` lands exactly where a
//! flat sort would put it among the siblings of `dir`.
//!
//! # Key Types
//!
//! - [`OrderedWalker`] -- Lazy walker; iterate it to pull entries one by one
//! - [`walk_ordered`] -- Callback form, aborts on the first visitor error
//! - [`WalkOptions`] -- Ignored names, non-regular file and symlink handling
//! - [`compare_augmented`] -- The per-level comparison key

pub mod error;
pub mod key;
pub mod options;
pub mod walker;

pub use error::{WalkError, WalkResult};
pub use key::{augmented_key, compare_augmented};
pub use options::{WalkOptions, DEFAULT_REF_FILE_NAME};
pub use walker::{walk_ordered, walk_ordered_with, OrderedIter, OrderedWalker};
