//! Remote listing side of strata.
//!
//! The merge-diff engine needs the remote objects as one sequence sorted by
//! path. Remote APIs hand them out page by page. This crate defines the
//! paginated lister interface and runs a producer task that fetches pages
//! ahead of the consumer into a bounded channel, so network latency overlaps
//! with the local walk.
//!
//! # Key Types
//!
//! - [`ObjectLister`] -- One page of objects per call (async)
//! - [`MemoryLister`] / [`JsonFileLister`] -- In-process listers
//! - [`spawn_listing`] / [`RemoteListing`] -- Producer task and its receiving end

pub mod error;
pub mod file;
pub mod lister;
pub mod memory;
pub mod stream;

pub use error::{RemoteError, RemoteResult};
pub use file::JsonFileLister;
pub use lister::{ListingConfig, ObjectLister, ObjectPage};
pub use memory::MemoryLister;
pub use stream::{spawn_listing, RemoteListing};
