//! Merge-diff engine for strata.
//!
//! Compares a local directory against the last-known remote listing in a
//! single forward pass. Both sides arrive sorted by path (the local side via
//! [`strata_walk::OrderedWalker`], the remote side by contract), so a
//! two-pointer merge classifies every path in O(n + m) time while holding at
//! most one entry per side.
//!
//! # Key Types
//!
//! - [`diff_local_with_head`] -- Run a full diff and collect the changes
//! - [`DiffStream`] -- The same merge as an iterator, for incremental delivery
//! - [`DiffOptions`] -- Walk options and the remote order check
//! - [`DiffError`] -- Walk, remote and precondition failures

pub mod error;
pub mod merge;
pub mod options;

pub use error::{DiffError, DiffResult};
pub use merge::{
    diff_local_with_head, diff_local_with_options, diff_local_with_records, DiffStream,
    LocalDiffStream,
};
pub use options::DiffOptions;
