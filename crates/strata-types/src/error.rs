use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown change type: {0} (expected added, removed or modified)")]
    UnknownChangeType(String),
}
