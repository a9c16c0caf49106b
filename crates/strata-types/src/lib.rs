//! Foundation types for strata.
//!
//! This crate provides the data model shared by the walker, the merge-diff
//! engine and the remote listing side. Every other strata crate depends on
//! `strata-types`.
//!
//! # Key Types
//!
//! - [`PathEntry`]: A file observed on local disk during an ordered walk
//! - [`ObjectStats`]: A remote object record as returned by a listing
//! - [`Change`] / [`ChangeType`]: One classified difference for a single path
//! - [`ChangeSummary`]: Per-kind counts over a change list

pub mod change;
pub mod entry;
pub mod error;
pub mod object;
pub mod temporal;

pub use change::{Change, ChangeSummary, ChangeType};
pub use entry::PathEntry;
pub use error::TypeError;
pub use object::{ObjectStats, PathType};
pub use temporal::{system_time_from_unix, unix_seconds};
