//! Error types for the diff crate.

use strata_walk::WalkError;

/// Errors that abort a diff. None of them leave a partial result behind.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The local walk failed.
    #[error("local walk failed: {0}")]
    Walk(#[from] WalkError),

    /// The remote listing reported an error mid-stream.
    #[error("remote listing failed: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote listing was not strictly ascending by path.
    #[error("remote listing out of order: {current:?} after {previous:?}")]
    UnsortedRemote { previous: String, current: String },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
